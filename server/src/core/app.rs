//! App state type

use std::sync::{atomic::AtomicU64, Arc};

use crate::bootstrap;
use crate::directory::resource::{GroupResource, UserResource};
use crate::directory::Directory;
use crate::prelude::*;
use crate::routes;
use scimdir_types::filter_adapter::FilterCompiler;
use scimdir_types::hooks::ResourceHooks;
use scimdir_types::snapshot_adapter::SnapshotStore;
use scimdir_types::user_source::UserSource;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub struct AppState {
	pub opts: AppBuilderOpts,
	pub directory: Arc<Directory>,

	pub user_hooks: Arc<dyn ResourceHooks>,
	pub group_hooks: Arc<dyn ResourceHooks>,

	/// Revision last shown to the management UI, the long-poll baseline
	pub ui_revision: AtomicU64,
}

pub type App = Arc<AppState>;

#[derive(Debug, Default)]
pub struct AppBuilderOpts {
	listen: Option<Box<str>>,
}

pub struct Adapters {
	pub snapshot_store: Option<Arc<dyn SnapshotStore>>,
	pub filter_compiler: Option<Arc<dyn FilterCompiler>>,
	pub user_source: Option<Arc<dyn UserSource>>,
}

pub struct AppBuilder {
	opts: AppBuilderOpts,
	adapters: Adapters,
}

impl AppBuilder {
	pub fn new() -> Self {
		AppBuilder {
			opts: AppBuilderOpts { listen: None },
			adapters: Adapters {
				snapshot_store: None,
				filter_compiler: None,
				user_source: None,
			},
		}
	}

	// Opts
	pub fn listen(&mut self, listen: impl Into<Box<str>>) -> &mut Self { self.opts.listen = Some(listen.into()); self }

	// Adapters
	pub fn snapshot_store(&mut self, snapshot_store: Arc<dyn SnapshotStore>) -> &mut Self { self.adapters.snapshot_store = Some(snapshot_store); self }
	pub fn filter_compiler(&mut self, filter_compiler: Arc<dyn FilterCompiler>) -> &mut Self { self.adapters.filter_compiler = Some(filter_compiler); self }
	pub fn user_source(&mut self, user_source: Arc<dyn UserSource>) -> &mut Self { self.adapters.user_source = Some(user_source); self }

	/// Bootstrap the directory and assemble the shared state without
	/// binding a listener. `run` builds on this; tests use it directly.
	pub async fn build(self) -> SdResult<App> {
		let snapshot_store = self
			.adapters
			.snapshot_store
			.ok_or_else(|| Error::Internal("no snapshot store adapter".into()))?;
		let filter_compiler = self
			.adapters
			.filter_compiler
			.ok_or_else(|| Error::Internal("no filter compiler adapter".into()))?;
		let user_source = self
			.adapters
			.user_source
			.ok_or_else(|| Error::Internal("no user source adapter".into()))?;

		let directory =
			Arc::new(bootstrap::bootstrap(snapshot_store, filter_compiler, user_source).await?);

		Ok(Arc::new(AppState {
			opts: self.opts,
			user_hooks: Arc::new(UserResource::new(directory.clone())),
			group_hooks: Arc::new(GroupResource::new(directory.clone())),
			directory,
			ui_revision: AtomicU64::new(0),
		}))
	}

	pub async fn run(self) -> SdResult<()> {
		tracing_subscriber::fmt()
			.with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
			.with_target(false)
			.init();
		info!("  ___  ___ ___ __  __   _ _");
		info!(" / __|/ __|_ _|  \\/  |_| (_)_ _");
		info!(" \\__ \\ (__ | || |\\/| / _` | | '_|");
		info!(" |___/\\___|___|_|  |_\\__,_|_|_|");
		info!("V{}", VERSION);
		info!("");

		let app = self.build().await?;

		let listen = match &app.opts.listen {
			Some(listen) => listen.to_string(),
			None => {
				let port = std::env::var("PORT")
					.ok()
					.and_then(|port| port.parse::<u16>().ok())
					.unwrap_or_else(|| app.directory.config().scimport);
				format!("0.0.0.0:{}", port)
			}
		};

		let router = routes::init(app.clone());
		let listener = tokio::net::TcpListener::bind(&listen).await?;
		info!("Listening on {}", listen);
		if let Some(token) = app.directory.config().token {
			info!("Bearer token: {}", token);
		}
		axum::serve(listener, router).await?;

		Ok(())
	}
}

impl Default for AppBuilder {
	fn default() -> Self { Self::new() }
}

// vim: ts=4
