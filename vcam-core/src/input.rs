/// Logical input actions, decoupled from physical keys
use std::collections::BTreeSet;

/// An abstract input event a backend reports as held for the current tick.
///
/// The declaration order is the order actions are applied within one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LogicalAction {
    MoveForward,
    MoveBack,
    MoveLeft,
    MoveRight,
    MoveUp,
    MoveDown,
    RotateUp,
    RotateDown,
    RotateRight,
    RotateLeft,
    RollCW,
    RollCCW,
    ZoomIn,
    ZoomOut,
    Reset,
    Quit,
}

/// The set of actions active in one tick, iterated in application order
pub type ActionSet = BTreeSet<LogicalAction>;

impl LogicalAction {
    pub const ALL: [LogicalAction; 16] = [
        LogicalAction::MoveForward,
        LogicalAction::MoveBack,
        LogicalAction::MoveLeft,
        LogicalAction::MoveRight,
        LogicalAction::MoveUp,
        LogicalAction::MoveDown,
        LogicalAction::RotateUp,
        LogicalAction::RotateDown,
        LogicalAction::RotateRight,
        LogicalAction::RotateLeft,
        LogicalAction::RollCW,
        LogicalAction::RollCCW,
        LogicalAction::ZoomIn,
        LogicalAction::ZoomOut,
        LogicalAction::Reset,
        LogicalAction::Quit,
    ];

    /// True for actions handled by the camera rather than the frame loop
    pub fn is_camera_action(self) -> bool {
        self != LogicalAction::Quit
    }
}
