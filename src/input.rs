/// Keys the editor reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Delete,
    Backspace,
    Escape,
    Shift,
    /// A printable key, matched case-insensitively
    Char(char),
}

/// Modifier keys held during a key event. `command` is Ctrl or Cmd.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub command: bool,
    pub shift: bool,
    pub alt: bool,
}

impl Modifiers {
    pub const NONE: Self = Self {
        command: false,
        shift: false,
        alt: false,
    };

    pub const COMMAND: Self = Self {
        command: true,
        shift: false,
        alt: false,
    };

    pub const COMMAND_SHIFT: Self = Self {
        command: true,
        shift: true,
        alt: false,
    };
}

/// Raw input forwarded by the shell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    KeyDown { key: Key, modifiers: Modifiers },
    KeyUp { key: Key, modifiers: Modifiers },
    /// The window lost focus; held keys are forgotten
    FocusLost,
}

/// What a key combination means
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutCommand {
    DeleteSelection,
    Undo,
    Redo,
    Export,
    SelectAll,
    ClearSelection,
}

/// Map a key press to its command
pub fn resolve_shortcut(key: Key, modifiers: Modifiers) -> Option<ShortcutCommand> {
    match key {
        Key::Delete | Key::Backspace if !modifiers.command => Some(ShortcutCommand::DeleteSelection),
        Key::Escape => Some(ShortcutCommand::ClearSelection),
        Key::Char(c) if modifiers.command => match c.to_ascii_lowercase() {
            'z' if modifiers.shift => Some(ShortcutCommand::Redo),
            'z' => Some(ShortcutCommand::Undo),
            'y' => Some(ShortcutCommand::Redo),
            's' => Some(ShortcutCommand::Export),
            'a' => Some(ShortcutCommand::SelectAll),
            _ => None,
        },
        _ => None,
    }
}

/// Modifier keys currently held, tracked from forwarded events
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ModifierState {
    shift: bool,
}

impl ModifierState {
    pub fn apply(&mut self, event: &InputEvent) {
        match event {
            InputEvent::KeyDown { key, modifiers } => {
                self.shift = modifiers.shift || *key == Key::Shift;
            }
            InputEvent::KeyUp { key, modifiers } => {
                self.shift = modifiers.shift && *key != Key::Shift;
            }
            InputEvent::FocusLost => self.shift = false,
        }
    }

    /// Shift toggles drag-time helper lines
    pub fn alignment_held(&self) -> bool {
        self.shift
    }
}
