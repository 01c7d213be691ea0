use chrono::Local;

use crate::markup::{self, Line, RenderMode};

/// Markup for the three-dot typing animation.
pub const TYPING_MARKUP: &str = "<span></span><span></span><span></span>";

/// Who a bubble belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    User,
    Bot,
}

impl Role {
    /// CSS class used for the wrapper and bubble elements.
    pub fn class(self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Bot => "bot",
        }
    }

    pub fn avatar(self) -> &'static str {
        match self {
            Role::User => "👤",
            Role::Bot => "🤖",
        }
    }
}

/// A message as handed to the renderer. Never mutated after creation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Message {
    /// Raw text, or literal markup when `is_pre_rendered` is set.
    pub content: Option<String>,
    pub role: Role,
    pub is_pre_rendered: bool,
}

impl Message {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            content: Some(text.into()),
            role: Role::User,
            is_pre_rendered: false,
        }
    }

    pub fn bot(text: impl Into<String>) -> Self {
        Self {
            content: Some(text.into()),
            role: Role::Bot,
            is_pre_rendered: false,
        }
    }

    /// Bot-role typing placeholder.
    pub fn typing() -> Self {
        Self {
            content: Some(TYPING_MARKUP.to_string()),
            role: Role::Bot,
            is_pre_rendered: true,
        }
    }
}

/// Identifies a bubble inside one [`ConversationView`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BubbleId(u64);

/// What a bubble displays.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BubbleBody {
    /// Transformed text: the HTML fragment plus the parsed tree used for
    /// native rendering.
    Text { html: String, lines: Vec<Line> },
    /// Literal markup supplied by the caller.
    Markup { html: String },
    /// The transient typing indicator.
    Typing,
}

impl BubbleBody {
    pub fn html(&self) -> &str {
        match self {
            BubbleBody::Text { html, .. } | BubbleBody::Markup { html } => html,
            BubbleBody::Typing => TYPING_MARKUP,
        }
    }
}

/// One rendered message in the conversation.
#[derive(Clone, Debug)]
pub struct Bubble {
    pub id: BubbleId,
    pub role: Role,
    pub body: BubbleBody,
    /// Local time of insertion, `HH:MM:SS`.
    pub timestamp: String,
}

impl Bubble {
    pub fn is_placeholder(&self) -> bool {
        matches!(self.body, BubbleBody::Typing)
    }
}

/// Ordered, append-only list of bubbles. The only removal allowed is of a
/// typing placeholder.
#[derive(Debug)]
pub struct ConversationView {
    bubbles: Vec<Bubble>,
    next_id: u64,
    mode: RenderMode,
    /// Set on every insertion, cleared by whoever scrolls the view.
    scroll_pending: bool,
}

impl ConversationView {
    pub fn new(mode: RenderMode) -> Self {
        Self {
            bubbles: Vec::new(),
            next_id: 0,
            mode,
            scroll_pending: false,
        }
    }

    pub fn bubbles(&self) -> &[Bubble] {
        &self.bubbles
    }

    pub fn len(&self) -> usize {
        self.bubbles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bubbles.is_empty()
    }

    pub fn last(&self) -> Option<&Bubble> {
        self.bubbles.last()
    }

    pub fn render_mode(&self) -> RenderMode {
        self.mode
    }

    /// Append a message and request a scroll to it.
    pub fn render(&mut self, message: Message) -> BubbleId {
        let body = if message.is_pre_rendered {
            match message.content {
                Some(html) if html == TYPING_MARKUP => BubbleBody::Typing,
                Some(html) => BubbleBody::Markup { html },
                None => BubbleBody::Markup {
                    html: String::new(),
                },
            }
        } else {
            let text = message.content.unwrap_or_default();
            BubbleBody::Text {
                html: markup::render_html(&text, self.mode),
                lines: markup::parse_message(&text),
            }
        };

        let id = BubbleId(self.next_id);
        self.next_id += 1;
        self.bubbles.push(Bubble {
            id,
            role: message.role,
            body,
            timestamp: Local::now().format("%H:%M:%S").to_string(),
        });
        self.scroll_pending = true;
        id
    }

    /// Append the typing placeholder.
    pub fn show_typing(&mut self) -> BubbleId {
        self.render(Message::typing())
    }

    /// Remove a typing placeholder. Returns false (and leaves the view alone)
    /// if `id` is unknown or names a regular bubble.
    pub fn remove_placeholder(&mut self, id: BubbleId) -> bool {
        match self.bubbles.iter().position(|b| b.id == id) {
            Some(idx) if self.bubbles[idx].is_placeholder() => {
                self.bubbles.remove(idx);
                true
            }
            _ => false,
        }
    }

    pub fn placeholder_count(&self) -> usize {
        self.bubbles.iter().filter(|b| b.is_placeholder()).count()
    }

    /// Returns true once after each insertion.
    pub fn take_scroll_request(&mut self) -> bool {
        std::mem::take(&mut self.scroll_pending)
    }

    /// Serialise the view as the message-list markup a host page would hold.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        for bubble in &self.bubbles {
            let class = bubble.role.class();
            let wrapper_class = if bubble.is_placeholder() {
                format!("message-wrapper {class} typing")
            } else {
                format!("message-wrapper {class}")
            };
            let inner = match &bubble.body {
                BubbleBody::Typing => format!("<div class=\"typing-dots\">{TYPING_MARKUP}</div>"),
                body => body.html().to_string(),
            };
            let msg = format!("<div class=\"message {class}\">{inner}</div>");
            let avatar = format!("<div class=\"avatar\">{}</div>", bubble.role.avatar());

            out.push_str(&format!("<div class=\"{wrapper_class}\">"));
            match bubble.role {
                Role::Bot => {
                    out.push_str(&avatar);
                    out.push_str(&msg);
                }
                Role::User => {
                    out.push_str(&msg);
                    out.push_str(&avatar);
                }
            }
            out.push_str("</div>");
        }
        out
    }
}

impl Default for ConversationView {
    fn default() -> Self {
        Self::new(RenderMode::default())
    }
}
