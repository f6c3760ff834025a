//! Subcommand handlers. Every handler writes one JSON document to `out`.

pub mod browse;

use crate::state::Session;
use crate::views;
use clap::Subcommand;
use kin_core::summary::{DashboardMetrics, LowQualityReport};
use kin_ranking::{compute_metrics, rank_questions, worst_answer_report};
use serde::Serialize;
use std::io::Write;

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List scored answers
    List {
        /// Substring searched in titles and question bodies
        #[arg(short, long, default_value = "")]
        query: String,

        /// Only answers in this category ("전체" for all)
        #[arg(short, long)]
        category: Option<String>,
    },

    /// Questions with the most answers
    Rank {
        /// Number of questions (defaults to the configured top_n)
        #[arg(long)]
        top: Option<usize>,
    },

    /// Hashtags extracted from question bodies
    Hashtags {
        #[arg(short, long)]
        k: Option<usize>,
    },

    /// Hot topics extracted from question titles
    HotTopics {
        #[arg(short, long)]
        k: Option<usize>,
    },

    /// Dashboard metrics and the worst flagged answer
    Metrics,

    /// One question with its scored answers
    Show {
        doc_id: String,
    },

    /// Interactive session reading commands from stdin
    Browse,
}

#[derive(Debug, Serialize)]
pub struct MetricsPayload {
    #[serde(flatten)]
    pub metrics: DashboardMetrics,
    pub report: Option<LowQualityReport>,
}

pub fn run(session: &mut Session, command: Command, pretty: bool, out: &mut impl Write) -> anyhow::Result<()> {
    match command {
        Command::List { query, category } => {
            let answers = views::listing(session, &query, category.as_deref());
            emit(&answers, pretty, out)
        }
        Command::Rank { top } => {
            let top = top.unwrap_or(session.config.ranking.top_n);
            emit(&rank_questions(session.records(), top), pretty, out)
        }
        Command::Hashtags { k } => emit(&views::hashtags(session, k)?, pretty, out),
        Command::HotTopics { k } => emit(&views::hot_topics(session, k)?, pretty, out),
        Command::Metrics => {
            let payload = MetricsPayload {
                metrics: compute_metrics(session.scored()),
                report: worst_answer_report(session.scored()),
            };
            emit(&payload, pretty, out)
        }
        Command::Show { doc_id } => emit(&views::detail_view(session, &doc_id)?, pretty, out),
        Command::Browse => {
            let stdin = std::io::stdin();
            browse::run_browse(session, stdin.lock(), out, pretty)
        }
    }
}

pub fn emit<T: Serialize>(value: &T, pretty: bool, out: &mut impl Write) -> anyhow::Result<()> {
    if pretty {
        serde_json::to_writer_pretty(&mut *out, value)?;
    } else {
        serde_json::to_writer(&mut *out, value)?;
    }
    writeln!(out)?;
    Ok(())
}
