use flash_core::model::looks_like_content;

/// Longest source text forwarded to the backend, in chars.
pub const MAX_SOURCE_CHARS: usize = 30_000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PromptOptions {
    pub min_cards: u32,
    pub max_cards: u32,
}

impl Default for PromptOptions {
    fn default() -> Self {
        Self {
            min_cards: 5,
            max_cards: 20,
        }
    }
}

/// What the prompt is built from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PromptSource<'a> {
    /// A short subject such as "Spanish greetings".
    Topic(&'a str),
    /// Pasted or imported material.
    Content(&'a str),
}

impl<'a> PromptSource<'a> {
    /// Treat long or multi-line input as content, anything else as a topic.
    #[must_use]
    pub fn infer(input: &'a str) -> Self {
        if looks_like_content(input) {
            Self::Content(input)
        } else {
            Self::Topic(input.trim())
        }
    }
}

#[must_use]
pub fn build_prompt(source: PromptSource<'_>, options: PromptOptions) -> String {
    let PromptOptions {
        min_cards,
        max_cards,
    } = options;
    let mut prompt = String::new();

    match source {
        PromptSource::Topic(topic) => {
            prompt.push_str(&format!(
                "Create between {min_cards} and {max_cards} study flashcards about: {topic}\n\n"
            ));
        }
        PromptSource::Content(content) => {
            prompt.push_str(&format!(
                "Create between {min_cards} and {max_cards} study flashcards covering the key \
                 terms and concepts in the following content.\n\nContent:\n"
            ));
            prompt.push_str(truncate_chars(content.trim(), MAX_SOURCE_CHARS));
            prompt.push_str("\n\n");
        }
    }

    prompt.push_str(
        "Format every flashcard on its own line exactly as\nTerm: Definition\n\
         Use a single colon after the term. Do not number the lines, do not use \
         markdown, and do not add any introduction or closing text.",
    );
    prompt
}

fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
