use std::time::Duration;

use anyhow::Result;
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use crate::app::{App, View};

/// Poll for events with a timeout
pub fn poll_event(timeout: Duration) -> Result<Option<Event>> {
    if event::poll(timeout)? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}

/// Handle a key event
pub fn handle_key_event(app: &mut App, key: KeyEvent) {
    // If help is shown, any key closes it
    if app.show_help {
        app.show_help = false;
        return;
    }

    // If detail overlay is shown, handle overlay-specific keys
    if app.show_detail_overlay {
        match key.code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Backspace | KeyCode::Char('q') => {
                app.close_overlay();
            }
            // Allow scrolling through packets while overlay is open
            KeyCode::Up | KeyCode::Char('k') => app.select_prev(),
            KeyCode::Down | KeyCode::Char('j') => app.select_next(),
            KeyCode::PageUp => app.select_prev_n(10),
            KeyCode::PageDown => app.select_next_n(10),
            KeyCode::Home => app.select_first(),
            KeyCode::End => app.select_last(),
            _ => {}
        }
        return;
    }

    // If filter input is active, handle text input
    if app.filter_active {
        handle_filter_input(app, key);
        return;
    }

    match key.code {
        KeyCode::Char('q') => app.quit(),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => app.quit(),

        // View switching
        KeyCode::Tab => {
            if key.modifiers.contains(KeyModifiers::SHIFT) {
                app.prev_view();
            } else {
                app.next_view();
            }
        }
        KeyCode::BackTab => app.prev_view(),
        KeyCode::Char('1') => app.set_view(View::Feed),
        KeyCode::Char('2') => app.set_view(View::Metrics),
        KeyCode::Char('3') => app.set_view(View::Sources),

        // Navigation (up/down for items, left/right for tabs)
        KeyCode::Up | KeyCode::Char('k') => app.select_prev(),
        KeyCode::Down | KeyCode::Char('j') => app.select_next(),
        KeyCode::Left | KeyCode::Char('h') => app.prev_view(),
        KeyCode::Right | KeyCode::Char('l') => app.next_view(),
        KeyCode::PageUp => app.select_prev_n(10),
        KeyCode::PageDown => app.select_next_n(10),
        KeyCode::Home => app.select_first(),
        KeyCode::End => app.select_last(),

        KeyCode::Enter => app.enter_detail(),
        KeyCode::Esc | KeyCode::Backspace => app.go_back(),

        KeyCode::Char('?') => app.toggle_help(),

        // Filter (Feed view)
        KeyCode::Char('/') => app.start_filter(),
        KeyCode::Char('c') => {
            if !app.filter_text.is_empty() {
                app.clear_filter();
            }
        }

        KeyCode::Char('p') => app.toggle_feed(),
        KeyCode::Char('e') => app.export(),

        _ => {}
    }
}

/// Handle key input while filter is active
fn handle_filter_input(app: &mut App, key: KeyEvent) {
    match key.code {
        // Confirm filter
        KeyCode::Enter => {
            app.filter_active = false;
        }

        // Cancel filter (keep text but exit input mode)
        KeyCode::Esc => {
            app.cancel_filter();
        }

        // Clear and exit
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.clear_filter();
        }

        KeyCode::Backspace => {
            app.filter_pop();
            if app.filter_text.is_empty() {
                app.filter_active = false;
            }
        }

        KeyCode::Char(c) => {
            app.filter_push(c);
        }

        _ => {}
    }
}

/// Handle mouse events.
///
/// `content_start_row` is the screen row of the current table's header.
pub fn handle_mouse_event(app: &mut App, mouse: MouseEvent, content_start_row: u16) {
    match mouse.kind {
        MouseEventKind::ScrollUp => app.select_prev(),
        MouseEventKind::ScrollDown => app.select_next(),

        MouseEventKind::Down(MouseButton::Left) => {
            let clicked_row = mouse.row;

            // Tab bar sits above the table border
            if clicked_row + 2 == content_start_row {
                // Approximate tab positions: Feed (0-8), Metrics (9-20), Sources (21-32)
                match mouse.column {
                    0..=8 => app.set_view(View::Feed),
                    9..=20 => app.set_view(View::Metrics),
                    21..=32 => app.set_view(View::Sources),
                    _ => {}
                }
            } else if clicked_row > content_start_row {
                // content_start_row is the table header row
                let item_row = (clicked_row - content_start_row - 1) as usize;
                app.select_first();
                app.select_next_n(item_row);
            }
        }

        // Right-click goes back
        MouseEventKind::Down(MouseButton::Right) => app.go_back(),

        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyEventKind, KeyEventState};

    use super::*;
    use crate::config::DashboardConfig;
    use crate::source::ChannelSource;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn app() -> App {
        let (_tx, source) = ChannelSource::create("test");
        App::new(Box::new(source), &DashboardConfig::default())
    }

    #[test]
    fn number_keys_switch_views() {
        let mut app = app();
        handle_key_event(&mut app, key(KeyCode::Char('3')));
        assert_eq!(app.current_view, View::Sources);
        handle_key_event(&mut app, key(KeyCode::Char('2')));
        assert_eq!(app.current_view, View::Metrics);
        handle_key_event(&mut app, key(KeyCode::Tab));
        assert_eq!(app.current_view, View::Sources);
    }

    #[test]
    fn filter_mode_captures_text() {
        let mut app = app();
        handle_key_event(&mut app, key(KeyCode::Char('/')));
        assert!(app.filter_active);

        // 'q' is text here, not quit
        handle_key_event(&mut app, key(KeyCode::Char('q')));
        handle_key_event(&mut app, key(KeyCode::Char('x')));
        assert!(app.running);
        assert_eq!(app.filter_text, "qx");

        handle_key_event(&mut app, key(KeyCode::Enter));
        assert!(!app.filter_active);
        assert_eq!(app.filter_text, "qx");

        handle_key_event(&mut app, key(KeyCode::Char('c')));
        assert!(app.filter_text.is_empty());
    }

    #[test]
    fn help_swallows_next_key() {
        let mut app = app();
        handle_key_event(&mut app, key(KeyCode::Char('?')));
        assert!(app.show_help);
        handle_key_event(&mut app, key(KeyCode::Char('q')));
        assert!(!app.show_help);
        assert!(app.running);
        handle_key_event(&mut app, key(KeyCode::Char('q')));
        assert!(!app.running);
    }

    #[test]
    fn ctrl_c_quits() {
        let mut app = app();
        handle_key_event(
            &mut app,
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
        );
        assert!(!app.running);
    }
}
