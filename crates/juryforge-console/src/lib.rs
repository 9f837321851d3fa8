//! Colorful console output for assignment runs.
//!
//! Provides a custom `tracing` layer that formats engine events with colors.
//!
//! ## Log Levels
//!
//! - **INFO**: Lifecycle events (generation start/end, commit)
//! - **WARN**: Degraded collaborators (AI fallback, interest lookups)
//! - **DEBUG**: One line per startup proposal
//! - **TRACE**: Individual candidate scores

use num_format::{Locale, ToFormattedString};
use owo_colors::OwoColorize;
use std::io::{self, Write};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::OnceLock;
use std::time::Instant;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::Context;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

static INIT: OnceLock<()> = OnceLock::new();
static EPOCH: OnceLock<Instant> = OnceLock::new();
static RUN_START_NANOS: AtomicU64 = AtomicU64::new(0);

/// Package version for banner display.
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Directives used when `RUST_LOG` is unset.
const DEFAULT_DIRECTIVES: &str = "juryforge_engine=info";

/// Initializes console output.
///
/// Safe to call multiple times - only the first call has effect.
/// Prints the JuryForge banner and sets up tracing. `RUST_LOG` overrides
/// the default `juryforge_engine=info` filter.
pub fn init() {
    INIT.get_or_init(|| {
        print_banner();

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVES));

        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(JuryConsoleLayer)
            .try_init();
    });
}

// Marks the start of a generation run for elapsed time tracking.
fn mark_run_start() {
    let epoch = EPOCH.get_or_init(Instant::now);
    let nanos = epoch.elapsed().as_nanos() as u64;
    RUN_START_NANOS.store(nanos, Ordering::Relaxed);
}

fn elapsed_secs() -> f64 {
    let Some(epoch) = EPOCH.get() else {
        return 0.0;
    };
    let start_nanos = RUN_START_NANOS.load(Ordering::Relaxed);
    let now_nanos = epoch.elapsed().as_nanos() as u64;
    now_nanos.saturating_sub(start_nanos) as f64 / 1_000_000_000.0
}

fn print_banner() {
    let banner = r#"
     _                 _____
    | |_   _ _ __ _   _|  ___|__  _ __ __ _  ___
 _  | | | | | '__| | | | |_ / _ \| '__/ _` |/ _ \
| |_| | |_| | |  | |_| |  _| (_) | | | (_| |  __/
 \___/ \__,_|_|   \__, |_|  \___/|_|  \__, |\___|
                  |___/               |___/
"#;

    let version_line = format!(
        "                 v{} - Juror Assignment Engine\n",
        VERSION
    );

    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{}", banner.bright_cyan());
    let _ = writeln!(stdout, "{}", version_line.bright_white().bold());
    let _ = stdout.flush();
}

/// A tracing layer that formats engine events with colors.
pub struct JuryConsoleLayer;

impl<S: Subscriber> Layer<S> for JuryConsoleLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        if !metadata.target().starts_with("juryforge") {
            return;
        }

        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        let output = format_event(&visitor, *metadata.level());
        if !output.is_empty() {
            let _ = writeln!(io::stdout(), "{}", output);
        }
    }
}

#[derive(Default)]
struct EventVisitor {
    event: Option<String>,
    round: Option<String>,
    startup: Option<String>,
    juror: Option<String>,
    score: Option<String>,
    error: Option<String>,
    startups: Option<u64>,
    jurors: Option<u64>,
    existing: Option<u64>,
    ai: Option<bool>,
    processed: Option<u64>,
    needed: Option<u64>,
    selected: Option<u64>,
    candidates: Option<u64>,
    proposals: Option<u64>,
    duration_ms: Option<u64>,
    candidates_scored: Option<u64>,
    reservations: Option<u64>,
    skipped: Option<u64>,
    ai_fallbacks: Option<u64>,
    warnings: Option<u64>,
    committed: Option<u64>,
    duplicates: Option<u64>,
    released: Option<u64>,
}

impl EventVisitor {
    fn text(&mut self, name: &str, value: String) {
        match name {
            "event" => self.event = Some(value),
            "round" => self.round = Some(value),
            "startup" => self.startup = Some(value),
            "juror" => self.juror = Some(value),
            "score" => self.score = Some(value),
            "error" => self.error = Some(value),
            _ => {}
        }
    }
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        let s = format!("{:?}", value);
        self.text(field.name(), s.trim_matches('"').to_string());
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.text(field.name(), value.to_string());
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        match field.name() {
            "startups" => self.startups = Some(value),
            "jurors" => self.jurors = Some(value),
            "existing" => self.existing = Some(value),
            "processed" => self.processed = Some(value),
            "needed" => self.needed = Some(value),
            "selected" => self.selected = Some(value),
            "candidates" => self.candidates = Some(value),
            "proposals" => self.proposals = Some(value),
            "duration_ms" => self.duration_ms = Some(value),
            "candidates_scored" => self.candidates_scored = Some(value),
            "reservations" => self.reservations = Some(value),
            "skipped" => self.skipped = Some(value),
            "ai_fallbacks" => self.ai_fallbacks = Some(value),
            "warnings" => self.warnings = Some(value),
            "committed" => self.committed = Some(value),
            "duplicates" => self.duplicates = Some(value),
            "released" => self.released = Some(value),
            _ => {}
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.record_u64(field, value.max(0) as u64);
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        if field.name() == "ai" {
            self.ai = Some(value);
        }
    }
}

fn format_event(v: &EventVisitor, level: Level) -> String {
    let event = v.event.as_deref().unwrap_or("");

    match event {
        "generation_start" => format_generation_start(v),
        "generation_end" => format_generation_end(v),
        "generation_cancelled" => format_generation_cancelled(v),
        "proposal" => format_proposal(v),
        "startup_skipped" => format_skipped(v),
        "candidate_scored" => format_candidate(v, level),
        "ai_fallback" | "interest_unavailable" | "no_jurors" => format_warning(v, event),
        "commit" => format_commit(v),
        "commit_conflict" | "commit_failed" => format_commit_failure(v, event),
        "review_cancelled" => format_review_cancelled(v),
        _ => String::new(),
    }
}

fn format_elapsed() -> String {
    format!("{:>7.3}s", elapsed_secs())
        .bright_black()
        .to_string()
}

fn count(n: Option<u64>) -> String {
    n.unwrap_or(0).to_formatted_string(&Locale::en)
}

fn format_generation_start(v: &EventVisitor) -> String {
    mark_run_start();
    let round = v.round.as_deref().unwrap_or("?");
    let ai = if v.ai.unwrap_or(false) {
        "AI on".bright_magenta().to_string()
    } else {
        "AI off".bright_black().to_string()
    };

    format!(
        "{} {} Generating {} │ {} startups │ {} jurors │ {} existing │ {}",
        format_elapsed(),
        "▶".bright_green().bold(),
        round.white().bold(),
        count(v.startups).bright_yellow(),
        count(v.jurors).bright_yellow(),
        count(v.existing).bright_yellow(),
        ai
    )
}

fn format_generation_end(v: &EventVisitor) -> String {
    let proposals = v.proposals.unwrap_or(0);
    let warnings = v.warnings.unwrap_or(0);
    let fallbacks = v.ai_fallbacks.unwrap_or(0);

    let mut output = format!(
        "{} {} Generation complete │ {} │ {} proposals │ {} candidates │ {} reservations",
        format_elapsed(),
        "■".bright_cyan().bold(),
        format_duration_ms(v.duration_ms.unwrap_or(0)).yellow(),
        proposals.to_formatted_string(&Locale::en).white().bold(),
        count(v.candidates_scored).bright_magenta(),
        count(v.reservations).white(),
    );

    if let Some(skipped) = v.skipped.filter(|&n| n > 0) {
        output.push_str(&format!(" │ {} skipped", skipped.bright_black()));
    }
    if fallbacks > 0 {
        output.push_str(&format!(" │ {} AI fallbacks", fallbacks.yellow()));
    }

    let status_text = if warnings == 0 {
        "PROPOSALS READY FOR REVIEW".to_string()
    } else {
        format!("PROPOSALS READY ({} WARNINGS)", warnings)
    };
    let inner_width: usize = 58;
    let total_pad = inner_width.saturating_sub(status_text.len());
    let left_pad = total_pad / 2;
    let right_pad = total_pad - left_pad;
    let status_colored = if warnings == 0 {
        status_text.bright_green().bold().to_string()
    } else {
        status_text.yellow().bold().to_string()
    };

    output.push_str("\n\n");
    output.push_str(
        &"╔══════════════════════════════════════════════════════════╗"
            .bright_cyan()
            .to_string(),
    );
    output.push('\n');
    output.push_str(&format!(
        "{}{}{}{}{}",
        "║".bright_cyan(),
        " ".repeat(left_pad),
        status_colored,
        " ".repeat(right_pad),
        "║".bright_cyan()
    ));
    output.push('\n');
    output.push_str(
        &"╚══════════════════════════════════════════════════════════╝"
            .bright_cyan()
            .to_string(),
    );
    output.push('\n');

    output
}

fn format_generation_cancelled(v: &EventVisitor) -> String {
    format!(
        "{} {} Generation cancelled after {} startups",
        format_elapsed(),
        "✗".bright_red().bold(),
        count(v.processed).white()
    )
}

fn format_proposal(v: &EventVisitor) -> String {
    let startup = v.startup.as_deref().unwrap_or("?");
    let needed = v.needed.unwrap_or(0);
    let selected = v.selected.unwrap_or(0);

    let filled = format!("{}/{}", selected, needed);
    let filled = if selected < needed {
        filled.yellow().to_string()
    } else {
        filled.bright_green().to_string()
    };

    format!(
        "{} {} {:<12} │ {} jurors │ {} candidates",
        format_elapsed(),
        "◆".bright_blue(),
        startup.white().bold(),
        filled,
        count(v.candidates).white()
    )
}

fn format_skipped(v: &EventVisitor) -> String {
    format!(
        "{} {} {:<12} │ already staffed",
        format_elapsed(),
        "·".bright_black(),
        v.startup.as_deref().unwrap_or("?").bright_black()
    )
}

fn format_candidate(v: &EventVisitor, level: Level) -> String {
    if level != Level::TRACE {
        return String::new();
    }

    format!(
        "{}     {:<10} → {:<10} │ {}",
        format_elapsed(),
        v.juror.as_deref().unwrap_or("?").bright_black(),
        v.startup.as_deref().unwrap_or("?").bright_black(),
        format_score(v.score.as_deref().unwrap_or("N/A"))
    )
}

fn format_warning(v: &EventVisitor, event: &str) -> String {
    let message = match event {
        "ai_fallback" => format!(
            "AI scoring unavailable for {}, using rule-based scores",
            v.startup.as_deref().unwrap_or("?")
        ),
        "interest_unavailable" => format!(
            "Interest lookup failed for {} / {}",
            v.juror.as_deref().unwrap_or("?"),
            v.startup.as_deref().unwrap_or("?")
        ),
        _ => format!("No jurors available for {}", v.round.as_deref().unwrap_or("?")),
    };

    let mut output = format!(
        "{} {} {}",
        format_elapsed(),
        "⚠".yellow().bold(),
        message.yellow()
    );
    if let Some(ref error) = v.error {
        output.push_str(&format!(" │ {}", error.bright_black()));
    }
    output
}

fn format_commit(v: &EventVisitor) -> String {
    format!(
        "{} {} Committed {} assignments for {}",
        format_elapsed(),
        "✓".bright_green().bold(),
        count(v.committed).bright_green().bold(),
        v.round.as_deref().unwrap_or("?").white().bold()
    )
}

fn format_commit_failure(v: &EventVisitor, event: &str) -> String {
    let detail = if event == "commit_conflict" {
        format!("{} pairings already exist", count(v.duplicates))
    } else {
        v.error.clone().unwrap_or_else(|| "write failed".to_string())
    };

    format!(
        "{} {} Commit rejected for {} │ {}",
        format_elapsed(),
        "✗".bright_red().bold(),
        v.round.as_deref().unwrap_or("?").white().bold(),
        detail.bright_red()
    )
}

fn format_review_cancelled(v: &EventVisitor) -> String {
    format!(
        "{} {} Review cancelled │ {} reservations released",
        format_elapsed(),
        "✗".yellow().bold(),
        count(v.released).white()
    )
}

fn format_duration_ms(ms: u64) -> String {
    if ms < 1000 {
        format!("{}ms", ms)
    } else if ms < 60_000 {
        format!("{:.2}s", ms as f64 / 1000.0)
    } else {
        let mins = ms / 60_000;
        let secs = (ms % 60_000) / 1000;
        format!("{}m {}s", mins, secs)
    }
}

// Colors a "<hard>hard/<soft>soft" match score.
fn format_score(score: &str) -> String {
    if let Some((hard, soft)) = score.split_once('/') {
        if let (Some(hard), Some(soft)) = (hard.strip_suffix("hard"), soft.strip_suffix("soft")) {
            let hard_num: f64 = hard.parse().unwrap_or(0.0);
            let soft_num: f64 = soft.parse().unwrap_or(0.0);

            let hard_str = if hard_num < 0.0 {
                format!("{}hard", hard).bright_red().to_string()
            } else {
                format!("{}hard", hard).bright_green().to_string()
            };

            let soft_str = if soft_num < 0.0 {
                format!("{}soft", soft).yellow().to_string()
            } else if soft_num > 0.0 {
                format!("{}soft", soft).bright_green().to_string()
            } else {
                format!("{}soft", soft).white().to_string()
            };

            return format!("{}/{}", hard_str, soft_str);
        }
    }

    score.white().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(s: &str) -> String {
        let mut out = String::new();
        let mut in_escape = false;
        for c in s.chars() {
            match (in_escape, c) {
                (false, '\u{1b}') => in_escape = true,
                (true, 'm') => in_escape = false,
                (true, _) => {}
                (false, c) => out.push(c),
            }
        }
        out
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration_ms(250), "250ms");
        assert_eq!(format_duration_ms(1_500), "1.50s");
        assert_eq!(format_duration_ms(125_000), "2m 5s");
    }

    #[test]
    fn test_format_score_keeps_text() {
        assert_eq!(plain(&format_score("-1hard/-950.00soft")), "-1hard/-950.00soft");
        assert_eq!(plain(&format_score("N/A")), "N/A");
    }

    #[test]
    fn test_proposal_line_shows_fill() {
        let v = EventVisitor {
            event: Some("proposal".into()),
            startup: Some("S1".into()),
            needed: Some(3),
            selected: Some(2),
            candidates: Some(1_200),
            ..EventVisitor::default()
        };

        let line = plain(&format_event(&v, Level::DEBUG));
        assert!(line.contains("S1"));
        assert!(line.contains("2/3 jurors"));
        assert!(line.contains("1,200 candidates"));
    }

    #[test]
    fn test_candidate_lines_only_at_trace() {
        let v = EventVisitor {
            event: Some("candidate_scored".into()),
            juror: Some("J1".into()),
            startup: Some("S1".into()),
            score: Some("0hard/70.00soft".into()),
            ..EventVisitor::default()
        };

        assert!(format_event(&v, Level::DEBUG).is_empty());
        assert!(plain(&format_event(&v, Level::TRACE)).contains("0hard/70.00soft"));
    }

    #[test]
    fn test_unknown_events_are_silent() {
        let v = EventVisitor {
            event: Some("candidate_toggled".into()),
            ..EventVisitor::default()
        };
        assert!(format_event(&v, Level::INFO).is_empty());
    }
}
