/// What happened to the mouse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseEventKind {
    Down,
    Move,
    Up,
}

/// Mouse button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// A mouse event in page coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MouseEvent {
    pub kind: MouseEventKind,
    /// Button pressed or released. `None` for plain motion.
    pub button: Option<MouseButton>,
    pub x: i32,
    pub y: i32,
}

impl MouseEvent {
    pub fn down(x: i32, y: i32) -> Self {
        Self {
            kind: MouseEventKind::Down,
            button: Some(MouseButton::Left),
            x,
            y,
        }
    }

    pub fn moved(x: i32, y: i32) -> Self {
        Self {
            kind: MouseEventKind::Move,
            button: None,
            x,
            y,
        }
    }

    pub fn up(x: i32, y: i32) -> Self {
        Self {
            kind: MouseEventKind::Up,
            button: Some(MouseButton::Left),
            x,
            y,
        }
    }

    pub fn with_button(mut self, button: MouseButton) -> Self {
        self.button = Some(button);
        self
    }

    pub fn is_left_button(&self) -> bool {
        self.button == Some(MouseButton::Left)
    }

    /// Convert a crossterm mouse event. Scroll events have no counterpart
    /// and yield `None`; drags become moves carrying their button.
    pub fn from_crossterm(event: &crossterm::event::MouseEvent) -> Option<Self> {
        use crossterm::event::MouseEventKind as CtKind;

        let (kind, button) = match event.kind {
            CtKind::Down(button) => (MouseEventKind::Down, Some(button.into())),
            CtKind::Up(button) => (MouseEventKind::Up, Some(button.into())),
            CtKind::Drag(button) => (MouseEventKind::Move, Some(button.into())),
            CtKind::Moved => (MouseEventKind::Move, None),
            _ => return None,
        };

        Some(Self {
            kind,
            button,
            x: i32::from(event.column),
            y: i32::from(event.row),
        })
    }
}

impl From<crossterm::event::MouseButton> for MouseButton {
    fn from(btn: crossterm::event::MouseButton) -> Self {
        use crossterm::event::MouseButton as CtBtn;
        match btn {
            CtBtn::Left => MouseButton::Left,
            CtBtn::Right => MouseButton::Right,
            CtBtn::Middle => MouseButton::Middle,
        }
    }
}
