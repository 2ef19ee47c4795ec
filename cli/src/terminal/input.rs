//! Keyboard listener that lets the user finish a scan early with `q` or Ctrl-C.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use lanaudit_common::{debug, warn};

const POLL_INTERVAL: Duration = Duration::from_millis(100);

pub struct InputHandle {
    done: Arc<AtomicBool>,
    thread: Option<JoinHandle<()>>,
}

impl InputHandle {
    /// Sets `stop` once an interrupt key is pressed. Listening ends when the handle drops.
    pub fn listen(stop: Arc<AtomicBool>) -> Self {
        let done: Arc<AtomicBool> = Arc::new(AtomicBool::new(false));
        let thread_done: Arc<AtomicBool> = Arc::clone(&done);

        let thread = thread::spawn(move || {
            if let Err(e) = enable_raw_mode() {
                debug!("Keyboard input disabled: {e}");
                return;
            }

            while !thread_done.load(Ordering::Relaxed) {
                if !event::poll(POLL_INTERVAL).unwrap_or(false) {
                    continue;
                }
                if let Ok(Event::Key(key_event)) = event::read()
                    && is_interrupt(&key_event)
                {
                    warn!("Finishing after the current host...");
                    stop.store(true, Ordering::Relaxed);
                    break;
                }
            }
            let _ = disable_raw_mode();
        });

        Self {
            done,
            thread: Some(thread),
        }
    }
}

pub fn is_interrupt(key_event: &KeyEvent) -> bool {
    let is_q = key_event.code == KeyCode::Char('q');
    let is_ctrl_c = key_event.code == KeyCode::Char('c')
        && key_event.modifiers.contains(KeyModifiers::CONTROL);

    (is_q || is_ctrl_c) && key_event.kind == KeyEventKind::Press
}

impl Drop for InputHandle {
    fn drop(&mut self) {
        self.done.store(true, Ordering::Relaxed);
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
        let _ = disable_raw_mode();
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
