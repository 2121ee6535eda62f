use lsp_server::Connection;
use lsp_types::{
    HoverProviderCapability, InitializeParams, ServerCapabilities, TextDocumentSyncCapability,
    TextDocumentSyncKind,
};
use swimlog::language::IntensitySystem;
use tracing::{debug, error, info};

mod server;

/// Run a language server on stdin/stdout giving editors a live summary of
/// the workout being written.
pub(crate) fn run_language_server(vocabulary: IntensitySystem, pool_type: &str) {
    debug!("Starting Workout Language Server");

    let (connection, threads) = Connection::stdio();

    let capabilities = match serde_json::to_value(ServerCapabilities {
        text_document_sync: Some(TextDocumentSyncCapability::Kind(TextDocumentSyncKind::FULL)),
        hover_provider: Some(HoverProviderCapability::Simple(true)),
        ..Default::default()
    }) {
        Ok(value) => value,
        Err(err) => {
            error!("Unable to describe server capabilities: {}", err);
            return;
        }
    };

    // extract any initialization parameters passed from the editor.
    match connection.initialize(capabilities) {
        Ok(params) => {
            info!("Workout Language Server starting on stdin");

            let mut server = server::WorkoutLanguageServer::new(vocabulary, pool_type);

            match serde_json::from_value::<InitializeParams>(params) {
                Ok(params) => server.configure(&params),
                Err(err) => error!("Malformed initialize parameters: {}", err),
            }

            if let Err(e) = server.run(connection) {
                eprintln!("Server error: {}", e);
            }
        }
        Err(err) => {
            error!("Initialization failed: {}", err);
            return;
        }
    }

    if let Err(err) = threads.join() {
        error!("Failed shutting down IO threads: {}", err);
    }
}
