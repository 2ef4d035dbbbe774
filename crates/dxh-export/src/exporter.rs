//! The transcript exporter.

use std::path::PathBuf;

use chrono::NaiveDateTime;

use dxh_model::{FormSchema, FormSnapshot};

use crate::error::Result;
use crate::options::TranscriptOptions;
use crate::render::{render, transcript_file_name};
use crate::sink::ArtifactSink;

/// A transcript that was written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedTranscript {
    /// Generated file name, before any collision suffix.
    pub file_name: String,
    /// Where the sink stored it.
    pub path: PathBuf,
    pub content: String,
}

/// Renders snapshots and hands them to a sink.
#[derive(Debug, Clone)]
pub struct TranscriptExporter<K> {
    options: TranscriptOptions,
    sink: K,
}

impl<K: ArtifactSink> TranscriptExporter<K> {
    pub fn new(options: TranscriptOptions, sink: K) -> Self {
        Self { options, sink }
    }

    pub fn options(&self) -> &TranscriptOptions {
        &self.options
    }

    pub fn sink(&self) -> &K {
        &self.sink
    }

    /// Render `snapshot` as of `at` and write it.
    pub fn export(
        &self,
        schema: &FormSchema,
        snapshot: &FormSnapshot,
        at: NaiveDateTime,
    ) -> Result<ExportedTranscript> {
        let content = render(schema, snapshot, at, &self.options);
        let file_name = transcript_file_name(&self.options.prefix, at, self.options.format);
        let path = self.sink.write(&file_name, &content)?;

        tracing::info!(
            path = %path.display(),
            format = %self.options.format,
            bytes = content.len(),
            "transcript exported"
        );

        Ok(ExportedTranscript {
            file_name,
            path,
            content,
        })
    }
}
