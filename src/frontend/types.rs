#[derive(Clone)]
pub struct ChatLine {
    pub speaker: Speaker,
    pub content: String,
}

impl ChatLine {
    pub fn new(speaker: Speaker, content: String) -> ChatLine {
        ChatLine { speaker, content }
    }
}

#[derive(Clone, Copy)]
pub enum Speaker {
    User,
    Bot,
}
