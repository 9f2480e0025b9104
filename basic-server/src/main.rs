use std::{env, sync::Arc};

use scimdir::AppBuilder;
use scimdir_filter_adapter_scim::ScimFilterCompiler;
use scimdir_snapshot_adapter_fs::SnapshotAdapterFs;
use scimdir_user_source_random::UserSourceRandom;

#[tokio::main(flavor = "current_thread")]
async fn main() {
	let snapshot_path =
		env::var("SCIMDIR_SNAPSHOT").unwrap_or_else(|_| "./config.json".to_string());

	let mut builder = AppBuilder::new();
	builder
		.snapshot_store(Arc::new(SnapshotAdapterFs::new(snapshot_path)))
		.filter_compiler(Arc::new(ScimFilterCompiler::new()))
		.user_source(Arc::new(UserSourceRandom::new()));
	if let Ok(listen) = env::var("SCIMDIR_LISTEN") {
		builder.listen(listen);
	}

	if let Err(err) = builder.run().await {
		eprintln!("fatal: {}", err);
		std::process::exit(1);
	}
}

// vim: ts=4
