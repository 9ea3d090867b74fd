//! Paragraph weaving orchestration.
//!
//! This module coordinates the full pipeline for one document pair:
//! lock-step interleaving, per-paragraph normalization, and output naming.
//! Batches of independent pairs are woven in parallel.

use indicatif::{ProgressBar, ProgressStyle};
use log::debug;
use rayon::prelude::*;

use crate::filename::output_filename;
use crate::marker::reposition_paragraph;
use crate::models::*;
use crate::punctuation::collapse_paragraph;

/// Which of the two input streams a woven paragraph came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stream {
    Source,
    Target,
}

/// Copy `paragraph` with the stream's alignment, direction and font
/// applied. Bold, italic, underline and colour survive.
pub fn restyle(paragraph: &Paragraph, style: &ScriptStyle) -> Paragraph {
    let mut styled = paragraph.clone();
    styled.apply_style(style);
    styled
}

/// Interleave the two streams: each source paragraph is followed by at
/// most one target paragraph, until the source stream is exhausted.
///
/// Target paragraphs beyond the length of the source stream are not
/// emitted.
pub fn interleave(
    source: &[Paragraph],
    target: &[Paragraph],
    style: &StylePolicy,
) -> Vec<(Stream, Paragraph)> {
    let mut woven = Vec::with_capacity(source.len() + target.len().min(source.len()));

    let mut i = 0;
    let mut j = 0;
    while i < source.len() {
        woven.push((Stream::Source, restyle(&source[i], &style.source)));
        i += 1;

        if j < target.len() {
            woven.push((Stream::Target, restyle(&target[j], &style.target)));
            j += 1;
        }
    }

    woven
}

/// Weave a source-script and a target-script paragraph list into one
/// document.
///
/// Source paragraphs get their verse markers repositioned, target
/// paragraphs get separator runs collapsed (each switchable through
/// `params`). The file name is derived from the first source paragraph.
pub fn weave(source: &[Paragraph], target: &[Paragraph], params: &WeaveParams) -> WeaveResult {
    let woven = interleave(source, target, &params.style);

    let mut summary = WeaveSummary {
        source_paragraphs: source.len(),
        target_paragraphs: target.len(),
        emitted: woven.len(),
        unmatched_source: source.len().saturating_sub(target.len()),
        dropped_target: target.len().saturating_sub(source.len()),
        ..Default::default()
    };

    let paragraphs: Vec<Paragraph> = woven
        .into_iter()
        .map(|(stream, mut paragraph)| {
            match stream {
                Stream::Source if params.reposition_markers => {
                    if reposition_paragraph(&mut paragraph) {
                        summary.markers_repositioned += 1;
                    }
                }
                Stream::Target if params.collapse_separators => {
                    if collapse_paragraph(&mut paragraph) {
                        summary.separators_collapsed += 1;
                    }
                }
                _ => {}
            }
            paragraph
        })
        .collect();

    let first_line = source.first().map(|p| p.text());
    let filename = output_filename(first_line.as_deref(), &params.filename);

    debug!(
        "wove {} + {} paragraphs into {} ({})",
        summary.source_paragraphs, summary.target_paragraphs, summary.emitted, filename
    );

    WeaveResult {
        version: env!("CARGO_PKG_VERSION").to_string(),
        filename,
        summary,
        paragraphs,
    }
}

/// Weave one pair, applying its own filename prefix if it has one.
pub fn weave_pair(pair: &DocumentPair, params: &WeaveParams) -> WeaveResult {
    match &pair.prefix {
        Some(prefix) => {
            let mut params = params.clone();
            params.filename.prefix = prefix.clone();
            weave(&pair.source, &pair.target, &params)
        }
        None => weave(&pair.source, &pair.target, params),
    }
}

/// Weave many independent document pairs in parallel.
///
/// Results are returned in input order.
pub fn weave_batch(
    pairs: &[DocumentPair],
    params: &WeaveParams,
    show_progress: bool,
) -> Vec<WeaveResult> {
    if show_progress {
        eprintln!("Weaving {} document pairs...", pairs.len());
    }

    let progress = if show_progress {
        let pb = ProgressBar::new(pairs.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template(
                    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({per_sec})",
                )
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );
        Some(pb)
    } else {
        None
    };

    let results: Vec<WeaveResult> = pairs
        .par_iter()
        .map(|pair| {
            let result = weave_pair(pair, params);
            if let Some(ref pb) = progress {
                pb.inc(1);
            }
            result
        })
        .collect();

    if let Some(pb) = progress {
        pb.finish_with_message("Done");
    }

    if show_progress {
        let repositioned: usize = results.iter().map(|r| r.summary.markers_repositioned).sum();
        let collapsed: usize = results.iter().map(|r| r.summary.separators_collapsed).sum();
        eprintln!("  Markers repositioned: {}", repositioned);
        eprintln!("  Separator runs collapsed: {}", collapsed);
    }

    results
}
