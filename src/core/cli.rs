//! CLI-only commands: config info, model search and selection, history management.
//!
//! These run without opening the TUI and produce plain text output.

use std::io::{self, IsTerminal, Read};

use crossterm::style::{Color, Stylize};
use serde_json::json;

use crate::core::api_key;
use crate::core::catalog::{self, ModelDescriptor};
use crate::core::config::{self, ConfigError};
use crate::core::history::{ChatHistory, ChatSession, JsonFilePersistence};
use crate::core::message::Role;
use crate::core::paths;
use crate::core::search::{self, HighlightColor, HighlightSpan, Palette, ScoredModel};
use crate::core::selection::{self, FileSelectionStore};

fn fail(e: impl std::fmt::Display) -> ! {
    eprintln!("Error: {}", e);
    std::process::exit(1);
}

fn display_path(p: Option<std::path::PathBuf>) -> String {
    p.map(|p| p.display().to_string())
        .unwrap_or_else(|| "—".to_string())
}

/// Run the `config` command: display paths, model, and API key status.
pub fn run_config() {
    let (model, source, api_key_status) = match config::load() {
        Ok(c) => (c.model_id, c.model_source, "set ✓"),
        Err(ConfigError::MissingApiKey) => {
            let (id, src) = selection::resolve_model(&FileSelectionStore::default());
            (id, src, "not set")
        }
        Err(e) => fail(e),
    };

    let catalog_path = catalog::user_catalog_path();
    let catalog_status = match catalog_path.as_ref() {
        Some(p) if p.exists() => p.display().to_string(),
        _ => "built-in".to_string(),
    };

    println!("Config:        {}", display_path(paths::config_dir()));
    println!("Cache:         {}", display_path(paths::cache_dir()));
    println!(
        "Conversations: {}",
        display_path(JsonFilePersistence::default().path().cloned())
    );
    println!(
        "Selection:     {}",
        display_path(FileSelectionStore::default().path().cloned())
    );
    println!("Catalog:       {}", catalog_status);
    println!("Model:         {} ({})", model, source);
    println!("API key:       {}", api_key_status);
}

/// Run the `config set-api-key` command: store API key in config directory.
pub fn run_config_set_api_key(api_key: Option<String>) {
    let key = match api_key {
        Some(k) if !k.trim().is_empty() => k.trim().to_string(),
        _ => {
            let mut buf = String::new();
            if let Err(e) = io::stdin().read_to_string(&mut buf) {
                fail(format!("reading from stdin: {}", e));
            }
            let trimmed = buf.trim().to_string();
            if trimmed.is_empty() {
                fail("no API key provided");
            }
            trimmed
        }
    };

    match api_key::store_api_key(&key) {
        Ok(path) => println!("API key saved to {}", path.display()),
        Err(e) => fail(e),
    }
}

/// Options of the `models` command.
#[derive(Debug, Default)]
pub struct ModelsOptions {
    pub limit: Option<usize>,
    pub json: bool,
    pub no_color: bool,
}

/// Run the `models` command: rank the catalog against the query and print it.
pub fn run_models(query_terms: &[String], opts: &ModelsOptions) {
    let models = catalog::load().unwrap_or_else(|e| fail(e));
    let query = query_terms.join(" ");
    let mut ranked = search::rank(&models, &query);
    if let Some(n) = opts.limit {
        ranked.truncate(n);
    }

    if opts.json {
        println!("{}", models_json(&ranked));
        return;
    }

    if ranked.is_empty() {
        println!("No models match {:?}.", query);
        return;
    }

    let color = !opts.no_color
        && std::env::var_os("NO_COLOR").is_none()
        && io::stdout().is_terminal();
    let (selected, _) = selection::resolve_model(&FileSelectionStore::default());
    for line in models_table(&ranked, &query, &selected, color) {
        println!("{}", line);
    }
    println!("\n{} model(s) listed", ranked.len());
}

fn models_json(ranked: &[ScoredModel<'_>]) -> String {
    let rows: Vec<_> = ranked
        .iter()
        .map(|s| {
            json!({
                "priority": s.priority.points(),
                "matched_fields": s.matches.matched_fields().map(|f| f.name()).collect::<Vec<_>>(),
                "model": s.model,
            })
        })
        .collect();
    serde_json::to_string_pretty(&rows).unwrap_or_else(|e| fail(e))
}

/// Table lines: header, rule, one row per model. `selected` gets a `*` marker.
fn models_table(
    ranked: &[ScoredModel<'_>],
    query: &str,
    selected: &str,
    color: bool,
) -> Vec<String> {
    let palette = Palette::default();
    // Same rule as `rank`: no usable tokens means no filtering and no scores.
    let unfiltered = search::tokenize(query).is_empty();
    let id_w = column_width(ranked, 20, |m| &m.model_string_for_api);
    let name_w = column_width(ranked, 24, |m| &m.model_name);
    let org_w = column_width(ranked, 12, |m| &m.organization);

    let mut lines = vec![
        format!(
            "  {:>8}  {:<id_w$}  {:<name_w$}  {:<org_w$}  {:>7}",
            "Priority", "ID", "Name", "Org", "Context"
        ),
        format!(
            "  {}  {}  {}  {}  -------",
            "-".repeat(8),
            "-".repeat(id_w),
            "-".repeat(name_w),
            "-".repeat(org_w)
        ),
    ];

    for s in ranked {
        let m = s.model;
        let marker = if m.model_string_for_api == selected {
            '*'
        } else {
            ' '
        };
        let priority = if unfiltered {
            "-".to_string()
        } else {
            s.priority.to_string()
        };
        lines.push(format!(
            "{} {:>8}  {}  {}  {}  {:>7}",
            marker,
            priority,
            highlighted_cell(&m.model_string_for_api, query, &palette, id_w, color),
            highlighted_cell(&m.model_name, query, &palette, name_w, color),
            highlighted_cell(&m.organization, query, &palette, org_w, color),
            catalog::format_context(m.context_length),
        ));
    }
    lines
}

fn column_width(
    ranked: &[ScoredModel<'_>],
    min: usize,
    field: impl Fn(&ModelDescriptor) -> &String,
) -> usize {
    ranked
        .iter()
        .map(|s| field(s.model).chars().count())
        .max()
        .unwrap_or(min)
        .max(min)
}

/// Render `text` with highlighted query terms, padded to `width` visible characters.
fn highlighted_cell(text: &str, query: &str, palette: &Palette, width: usize, color: bool) -> String {
    let spans = search::highlight(Some(text), query, palette);
    let mut out = render_spans(&spans, color);
    let visible = text.chars().count();
    if visible < width {
        out.push_str(&" ".repeat(width - visible));
    }
    out
}

fn render_spans(spans: &[HighlightSpan<'_>], color: bool) -> String {
    spans
        .iter()
        .map(|span| match span.color {
            Some(c) if color => span
                .text
                .with(Color::Black)
                .on(terminal_color(c))
                .to_string(),
            _ => span.text.to_string(),
        })
        .collect()
}

/// Terminal background for a highlight color (light tints, black text on top).
pub fn terminal_color(c: HighlightColor) -> Color {
    match c {
        HighlightColor::Yellow => Color::Rgb {
            r: 253,
            g: 224,
            b: 71,
        },
        HighlightColor::Green => Color::Rgb {
            r: 134,
            g: 239,
            b: 172,
        },
        HighlightColor::Blue => Color::Rgb {
            r: 147,
            g: 197,
            b: 253,
        },
        HighlightColor::Pink => Color::Rgb {
            r: 249,
            g: 168,
            b: 212,
        },
    }
}

/// Run the `select` command: validate and persist the model selection.
pub fn run_select(model_id: &str) {
    let models = catalog::load().unwrap_or_else(|e| fail(e));
    match selection::select(&FileSelectionStore::default(), &models, model_id) {
        Ok(m) => println!(
            "Selected model: {} ({})",
            m.model_name, m.model_string_for_api
        ),
        Err(e) => fail(e),
    }
}

fn open_history() -> ChatHistory<JsonFilePersistence> {
    let settings = config::settings().unwrap_or_else(|e| fail(e));
    ChatHistory::open(JsonFilePersistence::default(), settings.max_conversations)
}

/// Run the `history list` command: list conversations with optional filter and limit.
pub fn run_history_list(query: Option<&str>, limit: Option<usize>) {
    let history = open_history();
    let sessions = history.filter(query.unwrap_or(""));
    if sessions.is_empty() {
        println!("No conversations.");
        return;
    }
    let take = limit.unwrap_or(sessions.len());
    for s in sessions.into_iter().take(take) {
        println!("{}", history_row(s));
    }
}

fn history_row(s: &ChatSession) -> String {
    format!(
        "{}\t{}\t{}\t{}\t{} msg",
        s.id,
        s.label,
        format_timestamp(s.created_at),
        format_timestamp(s.updated_at),
        s.messages.len()
    )
}

/// Run the `history show` command: print a conversation transcript.
pub fn run_history_show(id: &str) {
    let history = open_history();
    let Some(session) = history.get(id) else {
        fail(format!("no conversation with ID {}", id));
    };
    println!("# {}", session.label);
    println!("{}\n", format_timestamp(session.updated_at));
    for m in &session.messages {
        let who = match m.role {
            Role::User => "You",
            Role::Assistant => "Assistant",
            Role::System => "System",
        };
        println!("{}: {}\n", who, m.content);
    }
}

/// Run the `history rename` command.
pub fn run_history_rename(id: &str, label: &str) {
    let mut history = open_history();
    match history.rename(id, label) {
        Ok(()) => println!("Renamed {}", id),
        Err(e) => fail(e),
    }
}

/// Run the `history delete` command.
pub fn run_history_delete(id: &str) {
    let mut history = open_history();
    match history.delete(id) {
        Ok(true) => println!("Deleted {}", id),
        Ok(false) => fail(format!("no conversation with ID {}", id)),
        Err(e) => fail(e),
    }
}

fn format_timestamp(secs: u64) -> String {
    use chrono::{Local, TimeZone};
    let dt = Local.timestamp_opt(secs as i64, 0).single();
    dt.map(|d| d.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| secs.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Vec<ModelDescriptor> {
        vec![
            ModelDescriptor::new("GPT-4o", "OpenAI", "gpt-4o", 128_000),
            ModelDescriptor::new("GPT-4o Mini", "OpenAI", "gpt-4o-mini", 128_000),
            ModelDescriptor::new("Gemma 2 27B", "Google", "google/gemma-2-27b-it", 8_192),
        ]
    }

    #[test]
    fn plain_cell_is_padded_to_width() {
        let cell = highlighted_cell("gpt-4o", "gpt", &Palette::default(), 10, false);
        assert_eq!(cell, "gpt-4o    ");
    }

    #[test]
    fn colored_cell_keeps_text_and_adds_escapes() {
        let cell = highlighted_cell("GPT-4o", "gpt", &Palette::default(), 6, true);
        assert!(cell.contains("GPT"));
        assert!(cell.contains("\u{1b}["));
        assert!(cell.ends_with("-4o"));
    }

    #[test]
    fn table_lists_ranked_models_with_priority() {
        let models = catalog();
        let ranked = search::rank(&models, "gpt mini");
        let lines = models_table(&ranked, "gpt mini", "gpt-4o-mini", false);
        assert!(lines[0].contains("Priority"));
        assert!(lines[2].starts_with("*"));
        assert!(lines[2].contains("150"));
        assert!(lines[2].contains("gpt-4o-mini"));
        assert_eq!(lines.len(), 2 + ranked.len());
        assert!(!lines.iter().any(|l| l.contains("gemma")));
    }

    #[test]
    fn empty_query_shows_dash_priority() {
        let models = catalog();
        let ranked = search::rank(&models, "");
        let lines = models_table(&ranked, "", "none", false);
        assert_eq!(lines.len(), 5);
        assert!(lines[2].trim_start().starts_with('-'));
    }

    #[test]
    fn punctuation_only_query_shows_dash_priority() {
        let models = catalog();
        let ranked = search::rank(&models, "- ...");
        let lines = models_table(&ranked, "- ...", "none", false);
        assert_eq!(lines.len(), 2 + models.len());
        assert!(lines[2..].iter().all(|l| l.trim_start().starts_with('-')));
    }

    #[test]
    fn json_rows_carry_priority_and_fields() {
        let models = catalog();
        let ranked = search::rank(&models, "google");
        let v: serde_json::Value = serde_json::from_str(&models_json(&ranked)).unwrap();
        assert_eq!(v[0]["model"]["model_string_for_api"], "google/gemma-2-27b-it");
        assert_eq!(v[0]["priority"], 90.0);
        let fields: Vec<&str> = v[0]["matched_fields"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|f| f.as_str())
            .collect();
        assert_eq!(fields, vec!["model_string_for_api", "organization"]);
    }

    #[test]
    fn history_row_is_tab_separated() {
        let s = ChatSession {
            id: "abc".into(),
            label: "Hello".into(),
            messages: vec![],
            created_at: 0,
            updated_at: 0,
        };
        let row = history_row(&s);
        assert_eq!(row.split('\t').count(), 5);
        assert!(row.starts_with("abc\tHello\t"));
    }
}
