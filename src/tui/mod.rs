//! TUI (Text User Interface) for chatting with the selected model.

mod app;
mod constants;
mod draw;
mod handlers;
mod shortcuts;
mod text;

use crossterm::event::{self, Event};
use crossterm::execute;
use std::io;
use std::sync::Arc;
use std::time::Duration;

use tokio::runtime::Runtime;

use crate::core::catalog::ModelDescriptor;
use crate::core::config::Config;
use crate::core::history::{ChatHistory, HistoryPersistence, JsonFilePersistence};
use crate::core::selection::FileSelectionStore;

use app::App;
use draw::draw;
use handlers::{HandleResult, PendingChat};

/// Guard that restores terminal state on drop (including on panic).
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        use crossterm::terminal::{LeaveAlternateScreen, disable_raw_mode};
        let _ = execute!(io::stdout(), event::PopKeyboardEnhancementFlags);
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

/// Wait briefly for the key following Esc (Option as Meta sends Esc+key).
/// Returns the follow-up key, if any arrived in time.
fn drain_escape_sequence() -> io::Result<Option<event::KeyEvent>> {
    let step_ms = 25u64;
    let mut elapsed = 0u64;
    while elapsed < constants::ESC_SEQUENCE_DRAIN_MS {
        if event::poll(Duration::from_millis(step_ms))?
            && let Event::Key(next) = event::read()?
        {
            return Ok(Some(next));
        }
        elapsed += step_ms;
    }
    Ok(None)
}

/// Run the TUI loop. Uses a dedicated Tokio runtime for chat requests.
pub fn run(config: Arc<Config>, catalog: Vec<ModelDescriptor>) -> io::Result<()> {
    use crossterm::terminal::{Clear, ClearType, EnterAlternateScreen, enable_raw_mode};
    use ratatui::Terminal;
    use ratatui::backend::CrosstermBackend;

    let rt = Arc::new(
        Runtime::new().map_err(|e| io::Error::other(format!("Failed to create runtime: {}", e)))?,
    );

    let persistence: Box<dyn HistoryPersistence> = Box::new(JsonFilePersistence::default());
    let history = ChatHistory::open(persistence, config.settings.max_conversations);
    let mut app = App::new(
        config.model_id.clone(),
        catalog,
        Box::new(FileSelectionStore::default()),
        history,
    );
    let mut pending_chat: Option<PendingChat> = None;

    let _guard = TerminalGuard;
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    execute!(stdout, Clear(ClearType::All))?;
    // Kitty keyboard protocol: Alt+key as single event with modifier (Ghostty, WezTerm, kitty, etc.)
    let _ = execute!(
        stdout,
        event::PushKeyboardEnhancementFlags(
            event::KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                | event::KeyboardEnhancementFlags::REPORT_ALTERNATE_KEYS
        )
    );
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
    log::info!("TUI started with model {}", app.model_id);

    loop {
        if let Some(ref chat) = pending_chat
            && let Ok(result) = chat.result_rx.try_recv()
        {
            app.apply_chat_result(result);
            pending_chat = None;
        }

        terminal.draw(|f| draw(f, &mut app, f.area()))?;

        if !event::poll(Duration::from_millis(constants::EVENT_POLL_TIMEOUT_MS))? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        let key_to_handle = if handlers::would_esc_start_meta_sequence(&key, &app, &pending_chat)
        {
            match drain_escape_sequence()? {
                Some(next) => {
                    app.escape_pending = true;
                    next
                }
                None => key,
            }
        } else {
            key
        };
        let result = handlers::handle_key(
            key_to_handle,
            handlers::HandleKeyContext {
                app: &mut app,
                config: &config,
                pending_chat: &mut pending_chat,
                rt: &rt,
            },
        );
        if result == HandleResult::Break {
            if let Some(pc) = pending_chat.take() {
                pc.cancel_token.cancel();
            }
            break;
        }
    }

    terminal.show_cursor()?;
    log::info!("TUI exited");
    Ok(())
}
