//! SCIM filter-expression compiler.
//!
//! Translates filter strings like `username eq "jdoe"` or
//! `active eq true and (title pr or name.familyname sw "Mc")` into
//! predicates over a record's JSON projection. Attribute names match
//! case-insensitively, mirroring the lowercased attribute keys the
//! directory stores.
//!
//! Supported grammar subset: comparison operators `eq ne co sw ew gt ge lt
//! le`, presence `pr`, logical `and`/`or`/`not`, parenthesised groups, and
//! dotted attribute paths. Multi-valued attributes match when any element
//! matches.

use serde_json::Value;

use scimdir::filter_adapter::{FilterCompiler, Predicate};
use scimdir::prelude::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum CompareOp {
	Eq,
	Ne,
	Co,
	Sw,
	Ew,
	Gt,
	Ge,
	Lt,
	Le,
}

impl CompareOp {
	fn from_word(word: &str) -> Option<CompareOp> {
		match word.to_ascii_lowercase().as_str() {
			"eq" => Some(CompareOp::Eq),
			"ne" => Some(CompareOp::Ne),
			"co" => Some(CompareOp::Co),
			"sw" => Some(CompareOp::Sw),
			"ew" => Some(CompareOp::Ew),
			"gt" => Some(CompareOp::Gt),
			"ge" => Some(CompareOp::Ge),
			"lt" => Some(CompareOp::Lt),
			"le" => Some(CompareOp::Le),
			_ => None,
		}
	}
}

#[derive(Debug)]
enum FilterExpr {
	And(Box<FilterExpr>, Box<FilterExpr>),
	Or(Box<FilterExpr>, Box<FilterExpr>),
	Not(Box<FilterExpr>),
	Present(Vec<Box<str>>),
	Compare(Vec<Box<str>>, CompareOp, Value),
}

impl FilterExpr {
	fn matches(&self, record: &Value) -> bool {
		match self {
			FilterExpr::And(lhs, rhs) => lhs.matches(record) && rhs.matches(record),
			FilterExpr::Or(lhs, rhs) => lhs.matches(record) || rhs.matches(record),
			FilterExpr::Not(inner) => !inner.matches(record),
			FilterExpr::Present(path) => {
				any_at_path(record, path, &|value| !value.is_null())
			}
			FilterExpr::Compare(path, op, literal) => {
				any_at_path(record, path, &|value| compare(value, *op, literal))
			}
		}
	}
}

/// Walk the attribute path, descending into arrays element-wise; true when
/// any reached value satisfies the check.
fn any_at_path(value: &Value, path: &[Box<str>], check: &dyn Fn(&Value) -> bool) -> bool {
	if let Value::Array(items) = value {
		return items.iter().any(|item| any_at_path(item, path, check));
	}
	match path.split_first() {
		None => check(value),
		Some((head, rest)) => match value {
			Value::Object(map) => map
				.iter()
				.filter(|(key, _)| key.eq_ignore_ascii_case(head))
				.any(|(_, child)| any_at_path(child, rest, check)),
			_ => false,
		},
	}
}

fn compare(value: &Value, op: CompareOp, literal: &Value) -> bool {
	match op {
		CompareOp::Eq => value_eq(value, literal),
		CompareOp::Ne => !value_eq(value, literal),
		CompareOp::Co | CompareOp::Sw | CompareOp::Ew => {
			let (Value::String(lhs), Value::String(rhs)) = (value, literal) else {
				return false;
			};
			let lhs = lhs.to_lowercase();
			let rhs = rhs.to_lowercase();
			match op {
				CompareOp::Co => lhs.contains(&rhs),
				CompareOp::Sw => lhs.starts_with(&rhs),
				_ => lhs.ends_with(&rhs),
			}
		}
		CompareOp::Gt | CompareOp::Ge | CompareOp::Lt | CompareOp::Le => {
			let Some(ordering) = value_cmp(value, literal) else {
				return false;
			};
			match op {
				CompareOp::Gt => ordering.is_gt(),
				CompareOp::Ge => ordering.is_ge(),
				CompareOp::Lt => ordering.is_lt(),
				_ => ordering.is_le(),
			}
		}
	}
}

fn value_eq(lhs: &Value, rhs: &Value) -> bool {
	match (lhs, rhs) {
		(Value::String(a), Value::String(b)) => a.eq_ignore_ascii_case(b),
		(Value::Number(a), Value::Number(b)) => {
			a.as_f64().zip(b.as_f64()).is_some_and(|(x, y)| x == y)
		}
		_ => lhs == rhs,
	}
}

fn value_cmp(lhs: &Value, rhs: &Value) -> Option<std::cmp::Ordering> {
	match (lhs, rhs) {
		(Value::String(a), Value::String(b)) => Some(a.cmp(b)),
		(Value::Number(a), Value::Number(b)) => a.as_f64()?.partial_cmp(&b.as_f64()?),
		_ => None,
	}
}

#[derive(Debug, PartialEq)]
enum Token {
	LParen,
	RParen,
	Word(String),
	Str(String),
}

fn tokenize(expression: &str) -> SdResult<Vec<Token>> {
	let mut tokens = Vec::new();
	let mut chars = expression.chars().peekable();

	while let Some(&ch) = chars.peek() {
		match ch {
			c if c.is_whitespace() => {
				chars.next();
			}
			'(' => {
				chars.next();
				tokens.push(Token::LParen);
			}
			')' => {
				chars.next();
				tokens.push(Token::RParen);
			}
			'"' => {
				chars.next();
				let mut literal = String::new();
				loop {
					match chars.next() {
						Some('"') => break,
						Some('\\') => match chars.next() {
							Some(escaped) => literal.push(escaped),
							None => return Err(Error::Parse),
						},
						Some(c) => literal.push(c),
						None => return Err(Error::Parse),
					}
				}
				tokens.push(Token::Str(literal));
			}
			_ => {
				let mut word = String::new();
				while let Some(&c) = chars.peek() {
					if c.is_whitespace() || c == '(' || c == ')' {
						break;
					}
					word.push(c);
					chars.next();
				}
				tokens.push(Token::Word(word));
			}
		}
	}
	Ok(tokens)
}

struct Parser {
	tokens: Vec<Token>,
	pos: usize,
}

impl Parser {
	fn peek(&self) -> Option<&Token> {
		self.tokens.get(self.pos)
	}

	fn next(&mut self) -> Option<&Token> {
		let token = self.tokens.get(self.pos);
		if token.is_some() {
			self.pos += 1;
		}
		token
	}

	fn peek_word_is(&self, keyword: &str) -> bool {
		matches!(self.peek(), Some(Token::Word(word)) if word.eq_ignore_ascii_case(keyword))
	}

	fn parse_or(&mut self) -> SdResult<FilterExpr> {
		let mut lhs = self.parse_and()?;
		while self.peek_word_is("or") {
			self.next();
			let rhs = self.parse_and()?;
			lhs = FilterExpr::Or(Box::new(lhs), Box::new(rhs));
		}
		Ok(lhs)
	}

	fn parse_and(&mut self) -> SdResult<FilterExpr> {
		let mut lhs = self.parse_unary()?;
		while self.peek_word_is("and") {
			self.next();
			let rhs = self.parse_unary()?;
			lhs = FilterExpr::And(Box::new(lhs), Box::new(rhs));
		}
		Ok(lhs)
	}

	fn parse_unary(&mut self) -> SdResult<FilterExpr> {
		if self.peek_word_is("not") {
			self.next();
			if !matches!(self.next(), Some(Token::LParen)) {
				return Err(Error::Parse);
			}
			let inner = self.parse_or()?;
			if !matches!(self.next(), Some(Token::RParen)) {
				return Err(Error::Parse);
			}
			return Ok(FilterExpr::Not(Box::new(inner)));
		}
		if matches!(self.peek(), Some(Token::LParen)) {
			self.next();
			let inner = self.parse_or()?;
			if !matches!(self.next(), Some(Token::RParen)) {
				return Err(Error::Parse);
			}
			return Ok(inner);
		}
		self.parse_compare()
	}

	fn parse_compare(&mut self) -> SdResult<FilterExpr> {
		let Some(Token::Word(attr)) = self.next() else {
			return Err(Error::Parse);
		};
		let path: Vec<Box<str>> = attr.split('.').map(Box::from).collect();

		let Some(Token::Word(op_word)) = self.next() else {
			return Err(Error::Parse);
		};
		if op_word.eq_ignore_ascii_case("pr") {
			return Ok(FilterExpr::Present(path));
		}
		let Some(op) = CompareOp::from_word(op_word) else {
			return Err(Error::Parse);
		};

		let literal = match self.next() {
			Some(Token::Str(text)) => Value::String(text.clone()),
			Some(Token::Word(word)) => match word.as_str() {
				"true" => Value::Bool(true),
				"false" => Value::Bool(false),
				"null" => Value::Null,
				_ => serde_json::from_str(word).map_err(|_| Error::Parse)?,
			},
			_ => return Err(Error::Parse),
		};
		Ok(FilterExpr::Compare(path, op, literal))
	}
}

fn parse(expression: &str) -> SdResult<FilterExpr> {
	let tokens = tokenize(expression)?;
	if tokens.is_empty() {
		return Err(Error::Parse);
	}
	let mut parser = Parser { tokens, pos: 0 };
	let expr = parser.parse_or()?;
	if parser.peek().is_some() {
		return Err(Error::Parse);
	}
	Ok(expr)
}

#[derive(Debug, Default)]
pub struct ScimFilterCompiler;

impl ScimFilterCompiler {
	pub fn new() -> Self {
		ScimFilterCompiler
	}
}

impl FilterCompiler for ScimFilterCompiler {
	fn compile(&self, expression: &str) -> SdResult<Predicate> {
		let expr = parse(expression)?;
		Ok(Box::new(move |record| expr.matches(record)))
	}
}


// vim: ts=4
