//! # Bridge: gifts decoupled from their look
//!
//! Abstractions ([`Plane`], [`Crown`]) and implementors ([`Color`], [`DressUp`])
//! vary independently: any gift can be sent in any color, with or without a
//! dress-up.
//!
//! ```text
//!   Gift ──────────── holds ──► Color   (Red, Blue)
//!   ├─ Plane           └─────► DressUp (Crystal), optional
//!   └─ Crown
//! ```

/// Color implementor.
pub trait Color: Send + Sync {
    /// Line describing the color in use.
    fn apply(&self) -> String;
}

/// Dress-up implementor.
pub trait DressUp: Send + Sync {
    /// Line describing the decoration in use.
    fn decorate(&self) -> String;
}

/// Red color.
#[derive(Clone, Copy, Debug, Default)]
pub struct Red;

impl Color for Red {
    fn apply(&self) -> String {
        "use red color.".to_string()
    }
}

/// Blue color.
#[derive(Clone, Copy, Debug, Default)]
pub struct Blue;

impl Color for Blue {
    fn apply(&self) -> String {
        "use blue color.".to_string()
    }
}

/// Crystal decoration.
#[derive(Clone, Copy, Debug, Default)]
pub struct Crystal;

impl DressUp for Crystal {
    fn decorate(&self) -> String {
        "use crystal dress up.".to_string()
    }
}

/// Gift abstraction: renders the lines produced when the gift is sent.
pub trait Gift {
    /// Lines printed when the gift is sent, in order.
    fn send(&self) -> Vec<String>;
}

/// Shared state of every gift: a color and an optional dress-up.
struct Look {
    color: Box<dyn Color>,
    dress_up: Option<Box<dyn DressUp>>,
}

impl Look {
    fn render(&self, gift_line: &str) -> Vec<String> {
        let mut lines = vec![self.color.apply()];
        if let Some(d) = &self.dress_up {
            lines.push(d.decorate());
        }
        lines.push(gift_line.to_string());
        lines
    }
}

/// Plane gift.
pub struct Plane {
    look: Look,
}

impl Plane {
    /// Plane in `color`, optionally decorated.
    pub fn new(color: impl Color + 'static, dress_up: Option<Box<dyn DressUp>>) -> Self {
        Self {
            look: Look {
                color: Box::new(color),
                dress_up,
            },
        }
    }
}

impl Gift for Plane {
    fn send(&self) -> Vec<String> {
        self.look.render("send a plane gift")
    }
}

/// Crown gift.
pub struct Crown {
    look: Look,
}

impl Crown {
    /// Crown in `color`, optionally decorated.
    pub fn new(color: impl Color + 'static, dress_up: Option<Box<dyn DressUp>>) -> Self {
        Self {
            look: Look {
                color: Box::new(color),
                dress_up,
            },
        }
    }
}

impl Gift for Crown {
    fn send(&self) -> Vec<String> {
        self.look.render("send a crown gift")
    }
}
