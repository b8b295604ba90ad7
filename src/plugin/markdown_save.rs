use std::fmt;
use std::io::{self, Stdout, Write};

use log::error;

use crate::api::HostApi;
use crate::event::{Event, EventType};

use super::Plugin;

const MARKDOWN_SUFFIX: &str = ".md";
const NOTICE_DURATION_MS: u32 = 3000;

/// Prints a line whenever a markdown file is saved.
pub struct MarkdownSave<W: Write> {
    out: W,
    notice_duration_ms: u32,
}

impl MarkdownSave<Stdout> {
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> MarkdownSave<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            notice_duration_ms: NOTICE_DURATION_MS,
        }
    }

    #[must_use]
    pub fn with_notice_duration(mut self, duration_ms: u32) -> Self {
        self.notice_duration_ms = duration_ms;
        self
    }

    pub fn output(&self) -> &W {
        &self.out
    }

    fn emit(&mut self, line: fmt::Arguments) {
        if let Err(e) = writeln!(self.out, "{line}").and_then(|()| self.out.flush()) {
            error!("Could not write plugin output: {}", e);
        }
    }
}

impl<W: Write> Plugin for MarkdownSave<W> {
    fn identifier(&self) -> String {
        String::from("markdown_save")
    }

    fn on_load(&mut self, api: &dyn HostApi) {
        api.log("Markdown save plugin loaded");
        let notice = "Markdown save plugin is active";
        if let Err(e) = api.show_notice(notice, self.notice_duration_ms) {
            api.log(&format!("Could not show notice: {e}"));
        }
    }

    fn on_unload(&mut self) {
        self.emit(format_args!("Markdown save plugin unloaded"));
    }

    fn on_event(&mut self, event_json: &str) {
        let event = match Event::try_from(event_json) {
            Ok(event) => event,
            Err(e) => {
                self.emit(format_args!("Error handling event: {e}"));
                return;
            }
        };
        if event.kind() != Some(EventType::FileSave) {
            return;
        }
        match event.str_field("path") {
            Ok(path) if path.ends_with(MARKDOWN_SUFFIX) => {
                self.emit(format_args!("Markdown file saved: {path}"));
            }
            Ok(_) => {}
            Err(e) => self.emit(format_args!("Error handling event: {e}")),
        }
    }
}
