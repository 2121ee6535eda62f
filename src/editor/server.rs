use std::collections::HashMap;

use lsp_server::{Connection, Message, Notification, Request, Response};
use lsp_types::{
    Diagnostic, DiagnosticSeverity, DidChangeTextDocumentParams, DidCloseTextDocumentParams,
    DidOpenTextDocumentParams, DidSaveTextDocumentParams, Hover, HoverContents, HoverParams,
    InitializeParams, MarkupContent, MarkupKind, Position, PublishDiagnosticsParams, Range,
    TextDocumentIdentifier, Uri,
};
use serde::Deserialize;
use serde_json::{from_value, to_value, Value};
use swimlog::formatting::{render_summary, Identity};
use swimlog::language::{IntensitySystem, WorkoutSummary};
use swimlog::parsing::{self, Options, ParsingError};
use tracing::{debug, error, info, warn};

use crate::problem::calculate_line_number;

type Failure = Box<dyn std::error::Error + Sync + Send>;

/// Parameters of the `swimlog/summary` request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SummaryParams {
    text_document: TextDocumentIdentifier,
    intensity_system: Option<String>,
}

/// Settings an editor may pass in `initializationOptions`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Settings {
    intensity_system: Option<String>,
    pool_type: Option<String>,
}

pub struct WorkoutLanguageServer {
    /// Map from URI to document content
    documents: HashMap<Uri, String>,
    vocabulary: IntensitySystem,
    pool_type: String,
}

impl WorkoutLanguageServer {
    pub fn new(vocabulary: IntensitySystem, pool_type: &str) -> Self {
        Self {
            documents: HashMap::new(),
            vocabulary,
            pool_type: pool_type.to_string(),
        }
    }

    /// Take on any settings the editor supplied when it initialized us.
    /// Settings that don't make sense are logged and ignored.
    pub fn configure(&mut self, params: &InitializeParams) {
        let settings = match &params.initialization_options {
            Some(value) => match from_value::<Settings>(value.clone()) {
                Ok(settings) => settings,
                Err(err) => {
                    warn!("Ignoring initialization options: {}", err);
                    Settings::default()
                }
            },
            None => Settings::default(),
        };

        if let Some(name) = settings.intensity_system {
            match IntensitySystem::from_name(&name) {
                Some(vocabulary) => self.vocabulary = vocabulary,
                None => warn!("Unknown intensity system {:?}", name),
            }
        }
        if let Some(pool_type) = settings.pool_type {
            self.pool_type = pool_type;
        }

        debug!(
            "Using {} intensities, pool {:?}",
            self.vocabulary
                .name(),
            self.pool_type
        );
    }

    /// Main server loop that handles incoming LSP messages
    pub fn run(mut self, connection: Connection) -> Result<(), Failure> {
        info!("Starting Language Server main loop");

        for message in &connection.receiver {
            match message {
                Message::Request(request) => {
                    if let Err(err) = self.handle_request(request, &|msg| {
                        connection
                            .sender
                            .send(msg)
                    }) {
                        error!("Error handling request: {}", err);
                    }
                }
                Message::Notification(notification) => {
                    if notification.method == "exit" {
                        break;
                    }

                    if let Err(error) = self.handle_notification(notification, &|message| {
                        connection
                            .sender
                            .send(message)
                    }) {
                        error!("Error handling notification: {}", error);
                    }
                }
                Message::Response(_resp) => {
                    // We don't expect responses as a server
                    warn!("Received unexpected response message");
                }
            }
        }

        Ok(())
    }

    fn handle_request<E>(
        &mut self,
        req: Request,
        sender: &dyn Fn(Message) -> Result<(), E>,
    ) -> Result<(), Failure>
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        match req
            .method
            .as_str()
        {
            "textDocument/hover" => {
                let params: HoverParams = from_value(req.params)?;
                let result = self.handle_hover(params);
                sender(Message::Response(Response::new_ok(req.id, result)))?;
            }
            "swimlog/summary" => {
                let params: SummaryParams = from_value(req.params)?;
                match self.handle_summary(params) {
                    Ok(result) => {
                        let response = Response::new_ok(req.id, result);
                        sender(Message::Response(response))?;
                    }
                    Err(err) => {
                        let response = Response::new_err(
                            req.id,
                            lsp_server::ErrorCode::InvalidParams as i32,
                            err.to_string(),
                        );
                        sender(Message::Response(response))?;
                    }
                }
            }
            "shutdown" => {
                info!("Language Server received shutdown request");
                let response = Response::new_ok(req.id, Value::Null);
                sender(Message::Response(response))?;
            }
            _ => {
                warn!("Unhandled request method: {}", req.method);
                let response = Response::new_err(
                    req.id,
                    lsp_server::ErrorCode::MethodNotFound as i32,
                    format!("Method not found: {}", req.method),
                );
                sender(Message::Response(response))?;
            }
        }
        Ok(())
    }

    fn handle_notification<E>(
        &mut self,
        notification: Notification,
        sender: &dyn Fn(Message) -> Result<(), E>,
    ) -> Result<(), Failure>
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        match notification
            .method
            .as_str()
        {
            "initialized" => {
                debug!("Client initialized");
            }
            "textDocument/didOpen" => {
                let params: DidOpenTextDocumentParams = from_value(notification.params)?;
                self.handle_did_open(params, sender)?;
            }
            "textDocument/didChange" => {
                let params: DidChangeTextDocumentParams = from_value(notification.params)?;
                self.handle_did_change(params, sender)?;
            }
            "textDocument/didSave" => {
                let params: DidSaveTextDocumentParams = from_value(notification.params)?;
                self.handle_did_save(params, sender)?;
            }
            "textDocument/didClose" => {
                let params: DidCloseTextDocumentParams = from_value(notification.params)?;
                self.handle_did_close(params, sender)?;
            }
            _ => {
                debug!("Unhandled notification method: {}", notification.method);
            }
        }
        Ok(())
    }

    fn handle_did_open<E>(
        &mut self,
        params: DidOpenTextDocumentParams,
        sender: &dyn Fn(Message) -> Result<(), E>,
    ) -> Result<(), Failure>
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        let uri = params
            .text_document
            .uri;
        let content = params
            .text_document
            .text;

        debug!("Document opened: {:?}", uri);

        self.documents
            .insert(uri.clone(), content);

        self.parse_and_report(uri, sender)
    }

    fn handle_did_change<E>(
        &mut self,
        params: DidChangeTextDocumentParams,
        sender: &dyn Fn(Message) -> Result<(), E>,
    ) -> Result<(), Failure>
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        let uri = params
            .text_document
            .uri;

        // full sync, so the last change holds the whole document
        if let Some(change) = params
            .content_changes
            .into_iter()
            .last()
        {
            debug!("Document changed: {:?}", uri);

            self.documents
                .insert(uri.clone(), change.text);

            self.parse_and_report(uri, sender)?;
        }
        Ok(())
    }

    fn handle_did_save<E>(
        &mut self,
        params: DidSaveTextDocumentParams,
        sender: &dyn Fn(Message) -> Result<(), E>,
    ) -> Result<(), Failure>
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        let uri = params
            .text_document
            .uri;
        debug!("Document saved: {:?}", uri);

        if let Some(text) = params.text {
            self.documents
                .insert(uri.clone(), text);
        }

        if self
            .documents
            .contains_key(&uri)
        {
            self.parse_and_report(uri, sender)?;
        }
        Ok(())
    }

    fn handle_did_close<E>(
        &mut self,
        params: DidCloseTextDocumentParams,
        sender: &dyn Fn(Message) -> Result<(), E>,
    ) -> Result<(), Failure>
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        let uri = params
            .text_document
            .uri;
        debug!("Document closed: {:?}", uri);

        self.documents
            .remove(&uri);

        // Clear diagnostics for closed document
        self.publish_diagnostics(uri, vec![], sender)
    }

    fn handle_hover(&self, params: HoverParams) -> Option<Hover> {
        let uri = params
            .text_document_position_params
            .text_document
            .uri;

        debug!("Hover request: {:?}", uri);

        let content = self
            .documents
            .get(&uri)?;

        let summary = self.preview(content, self.vocabulary);
        let report = match render_summary(&Identity, &summary, &self.pool_type) {
            Ok(report) => report,
            Err(err) => {
                error!("Failed rendering summary: {}", err);
                return None;
            }
        };

        Some(Hover {
            contents: HoverContents::Markup(MarkupContent {
                kind: MarkupKind::Markdown,
                value: format!("```text\n{}```", report),
            }),
            range: None,
        })
    }

    fn handle_summary(&self, params: SummaryParams) -> Result<Value, Failure> {
        let uri = params
            .text_document
            .uri;

        debug!("Summary request: {:?}", uri);

        let vocabulary = match params.intensity_system {
            Some(name) => Options::new(&name)?.vocabulary,
            None => self.vocabulary,
        };

        let content = match self
            .documents
            .get(&uri)
        {
            Some(content) => content,
            None => {
                return Err("Document not open".into());
            }
        };

        let summary = self.preview(content, vocabulary);
        Ok(to_value(summary)?)
    }

    /// The summary shown while editing, which counts whatever can be counted
    /// even if a group has been left open.
    fn preview(&self, content: &str, vocabulary: IntensitySystem) -> WorkoutSummary {
        let options = Options {
            vocabulary,
            ..Options::default()
        };

        // lenient parsing cannot fail
        parsing::parse(content, &options).unwrap_or_default()
    }

    /// Parse document and publish the outcome as diagnostics
    fn parse_and_report<E>(
        &self,
        uri: Uri,
        sender: &dyn Fn(Message) -> Result<(), E>,
    ) -> Result<(), Failure>
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        let content = match self
            .documents
            .get(&uri)
        {
            Some(content) => content,
            None => return Ok(()),
        };

        let options = Options {
            vocabulary: self.vocabulary,
            ..Options::default()
        }
        .strict();

        let mut diagnostics = Vec::new();

        if let Err(error) = parsing::parse(content, &options) {
            diagnostics.push(self.convert_parsing_error(content, &error));
        }

        let summary = self.preview(content, self.vocabulary);
        diagnostics.push(Diagnostic {
            range: Range {
                start: Position {
                    line: 0,
                    character: 0,
                },
                end: Position {
                    line: 0,
                    character: 0,
                },
            },
            severity: Some(DiagnosticSeverity::INFORMATION),
            code: None,
            code_description: None,
            source: Some("swimlog".to_string()),
            message: format!(
                "Total {} {}",
                summary.total_distance,
                swimlog::formatting::units(&self.pool_type)
            ),
            related_information: None,
            tags: None,
            data: None,
        });

        self.publish_diagnostics(uri, diagnostics, sender)
    }

    fn publish_diagnostics<E>(
        &self,
        uri: Uri,
        diagnostics: Vec<Diagnostic>,
        sender: &dyn Fn(Message) -> Result<(), E>,
    ) -> Result<(), Failure>
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        let params = PublishDiagnosticsParams {
            uri,
            diagnostics,
            version: None,
        };

        let notification =
            Notification::new("textDocument/publishDiagnostics".to_string(), to_value(params)?);

        sender(Message::Notification(notification))?;
        Ok(())
    }

    fn convert_parsing_error(&self, content: &str, error: &ParsingError) -> Diagnostic {
        let offset = error.offset();
        let start = offset_to_position(content, offset);
        let end = offset_to_position(content, offset + 1);

        let (message, severity) = match error {
            ParsingError::InvalidInput(reason) => {
                (format!("Invalid input: {}", reason), DiagnosticSeverity::ERROR)
            }
            ParsingError::UnterminatedGroup(_) => (
                "Group is never closed; its distance is not counted".to_string(),
                DiagnosticSeverity::WARNING,
            ),
        };

        Diagnostic {
            range: Range { start, end },
            severity: Some(severity),
            code: None,
            code_description: None,
            source: Some("swimlog".to_string()),
            message,
            related_information: None,
            tags: None,
            data: None,
        }
    }
}

/// Convert byte offset to LSP Position. Columns are counted in UTF-16 code
/// units, which is what editors expect unless told otherwise.
fn offset_to_position(text: &str, offset: usize) -> Position {
    let offset = offset.min(text.len());
    let line = calculate_line_number(text, offset) as u32;

    let before = &text[..offset];
    let start = match before.rfind('\n') {
        Some(i) => i + 1,
        None => 0,
    };
    let character = before[start..]
        .encode_utf16()
        .count() as u32;

    Position { line, character }
}
