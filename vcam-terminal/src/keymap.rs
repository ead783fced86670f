/// Physical key to logical action bindings
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use vcam_core::{ActionSet, LogicalAction};

/// Fold letter case so a key's press and release always agree
pub fn normalize(code: KeyCode) -> KeyCode {
    match code {
        KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
        other => other,
    }
}

/// Ctrl-C arrives as a key event while the terminal is in raw mode
pub fn is_interrupt(key: &KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL)
        && matches!(normalize(key.code), KeyCode::Char('c'))
}

pub fn action_for(code: KeyCode) -> Option<LogicalAction> {
    let action = match normalize(code) {
        KeyCode::Char('w') => LogicalAction::MoveForward,
        KeyCode::Char('s') => LogicalAction::MoveBack,
        KeyCode::Char('a') => LogicalAction::MoveLeft,
        KeyCode::Char('d') => LogicalAction::MoveRight,
        KeyCode::Char(' ') => LogicalAction::MoveUp,
        KeyCode::Char('c') => LogicalAction::MoveDown,
        KeyCode::Up => LogicalAction::RotateUp,
        KeyCode::Down => LogicalAction::RotateDown,
        KeyCode::Right => LogicalAction::RotateRight,
        KeyCode::Left => LogicalAction::RotateLeft,
        KeyCode::Char('e') => LogicalAction::RollCW,
        KeyCode::Char('q') => LogicalAction::RollCCW,
        KeyCode::Char('+') | KeyCode::Char('=') => LogicalAction::ZoomIn,
        KeyCode::Char('-') => LogicalAction::ZoomOut,
        KeyCode::Char('r') => LogicalAction::Reset,
        KeyCode::Char('p') | KeyCode::Esc => LogicalAction::Quit,
        _ => return None,
    };
    Some(action)
}

/// Tracks which actions are held between ticks.
///
/// Held state is keyed by action, not key code: a shifted key may report
/// `+` on press and `=` on release, and both must release `ZoomIn`.
#[derive(Debug, Default)]
pub struct KeyState {
    held: ActionSet,
    /// Whether the terminal reports key releases
    release_events: bool,
    quit_requested: bool,
}

impl KeyState {
    pub fn new(release_events: bool) -> Self {
        Self {
            release_events,
            ..Self::default()
        }
    }

    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }

    pub fn handle(&mut self, key: KeyEvent) {
        if is_interrupt(&key) {
            self.quit_requested = true;
            return;
        }

        let Some(action) = action_for(key.code) else {
            return;
        };
        match key.kind {
            KeyEventKind::Press | KeyEventKind::Repeat => {
                self.held.insert(action);
            }
            KeyEventKind::Release => {
                self.held.remove(&action);
            }
        }
    }

    /// Actions for the keys held this tick.
    ///
    /// Without release events a key counts as held for one tick per event.
    pub fn take_actions(&mut self) -> ActionSet {
        if self.release_events {
            self.held.clone()
        } else {
            std::mem::take(&mut self.held)
        }
    }
}
