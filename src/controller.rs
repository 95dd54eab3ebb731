use std::sync::Arc;

use clap::ValueEnum;
use tracing::{debug, warn};

use crate::client::Verifier;
use crate::clipboard::ClipboardSink;
use crate::types::{single_line, VerificationRequest, Verdict};

/// Display regions of the result surface. Regions are independently
/// optional; a deployment only fills the ones its backend returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    Response,
    LlmResponse,
    SearchResult,
    Source,
    /// Fallback for verdicts with no known fields: the whole record.
    Raw,
}

impl Region {
    pub fn label(&self) -> &'static str {
        match self {
            Region::Response => "response",
            Region::LlmResponse => "llm_response",
            Region::SearchResult => "search_result",
            Region::Source => "source",
            Region::Raw => "raw",
        }
    }
}

/// Rendering surface the controller writes to.
pub trait ResultView: Send {
    fn set_region(&mut self, region: Region, text: &str);
    fn alert(&mut self, message: &str);
}

/// Serialization the copy action puts on the clipboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CopyFormat {
    /// Two-line "Response / Source" summary
    Summary,
    /// The raw verdict as pretty-printed JSON
    Json,
}

/// Binds a submission to one `/verify` call and renders the verdict.
///
/// Holds the single in-memory verdict the copy action serializes; each
/// successful submission overwrites it.
pub struct VerifyController {
    verifier: Arc<dyn Verifier>,
    view: Box<dyn ResultView>,
    clipboard: Box<dyn ClipboardSink>,
    copy_format: CopyFormat,
    last: Option<Verdict>,
}

impl VerifyController {
    pub fn new(
        verifier: Arc<dyn Verifier>,
        view: Box<dyn ResultView>,
        clipboard: Box<dyn ClipboardSink>,
        copy_format: CopyFormat,
    ) -> Self {
        Self { verifier, view, clipboard, copy_format, last: None }
    }

    /// One full submit cycle: call the endpoint, render on success, alert on
    /// failure. Errors never escape; the return value reports whether a
    /// verdict was rendered.
    pub async fn submit(&mut self, req: VerificationRequest) -> bool {
        debug!(query = %req.llm_query, "submitting");
        match self.verifier.verify(&req).await {
            Ok(verdict) => {
                self.render(&verdict);
                self.last = Some(verdict);
                true
            }
            Err(err) => {
                // failed submissions leave the previous verdict in place
                self.view.alert(&format!("Error: {err}"));
                false
            }
        }
    }

    fn render(&mut self, verdict: &Verdict) {
        for (region, field) in [
            (Region::Response, &verdict.response),
            (Region::LlmResponse, &verdict.llm_response),
            (Region::SearchResult, &verdict.search_result),
            (Region::Source, &verdict.source),
        ] {
            if let Some(text) = field {
                self.view.set_region(region, &single_line(text));
            }
        }
        if !verdict.has_known_fields() {
            self.view.set_region(Region::Raw, &verdict.pretty_json());
        }
    }

    /// Copy the last verdict to the clipboard. A no-op until the first
    /// successful submission.
    pub fn copy_last(&mut self) -> bool {
        let Some(verdict) = &self.last else { return false };
        let text = match self.copy_format {
            CopyFormat::Summary => verdict.summary(),
            CopyFormat::Json => verdict.pretty_json(),
        };
        match self.clipboard.set_text(&text) {
            Ok(()) => {
                self.view.alert("Response copied to clipboard!");
                true
            }
            Err(err) => {
                warn!(error = %err, "clipboard write failed");
                false
            }
        }
    }

    pub fn last(&self) -> Option<&Verdict> {
        self.last.as_ref()
    }
}
