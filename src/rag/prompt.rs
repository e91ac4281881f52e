//! Deterministic prompt assembly.
//!
//! The template is injected into the pipeline rather than hard-coded, so
//! alternative instruction sets (different target dialects, different
//! strictness) are a config concern, not a code fork. Rendering is pure
//! string work: preamble, the draft verbatim, the retrieved examples in
//! ranked order, then the formatting rules. The rules constrain the shape
//! of the generated artifact by instruction only; nothing downstream
//! validates the model's output.

const DEFAULT_PREAMBLE: &str = "\
You are a code generation assistant specialized in translating structured \
protocol drafts into valid and complete B2Scala code. Use the retrieved \
examples below and the draft to produce a B2Scala implementation. Output \
only the source file contents, starting with a short header comment naming \
the draft title and the examples used.";

const DEFAULT_RULES: &str = "\
- Begin with the standard B2Scala import header, exactly as in the examples; \
add no imports that are not part of the B2Scala library.
- Declare a single top-level object named {object} containing the agent \
definitions and the execution entry point, in that order.
- Express all coordination with the Bach primitives (tell, get, ask, nask); \
do not invent undefined variables or methods.
- Keep the code concise, with comments showing the message flow.
- Where the draft leaves an assumption open, make a reasonable choice and \
mark it with an inline comment.
- Output only the Scala code, no surrounding explanation.";

/// Instruction template for one generation request.
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    preamble: String,
    rules: String,
}

impl Default for PromptTemplate {
    fn default() -> Self {
        Self {
            preamble: DEFAULT_PREAMBLE.to_string(),
            rules: DEFAULT_RULES.to_string(),
        }
    }
}

impl PromptTemplate {
    /// Build a template from custom instruction text. `rules` may contain
    /// the `{object}` placeholder, replaced at render time with the object
    /// name derived from the draft title.
    pub fn new(preamble: impl Into<String>, rules: impl Into<String>) -> Self {
        Self {
            preamble: preamble.into(),
            rules: rules.into(),
        }
    }

    /// Render the full prompt for a draft and its ranked context chunks.
    ///
    /// The draft appears verbatim; the chunks are joined with newlines in
    /// the order given, which is the similarity ranking and must be
    /// preserved.
    pub fn render(&self, draft: &str, context: &[String]) -> String {
        let context_text = context.join("\n");
        let rules = self.rules.replace("{object}", &object_name(draft));

        format!(
            "{}\n\n--- DRAFT ---\n{}\n\n--- RETRIEVED EXAMPLES ---\n{}\n\n--- INSTRUCTIONS ---\n{}\n",
            self.preamble, draft, context_text, rules
        )
    }
}

/// Derive a Scala object name from the draft title (its first non-empty
/// line): words are CamelCased, everything else is dropped. Titles that
/// sanitize to nothing, or that would start with a digit, fall back to a
/// `Protocol` prefix.
pub fn object_name(draft: &str) -> String {
    let title = draft
        .lines()
        .find(|line| !line.trim().is_empty())
        .unwrap_or("");

    let mut name = String::new();
    for word in title.split(|c: char| !c.is_ascii_alphanumeric()) {
        if word.is_empty() {
            continue;
        }
        if name.len() >= 40 {
            break;
        }
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            name.push(first.to_ascii_uppercase());
            name.extend(chars.map(|c| c.to_ascii_lowercase()));
        }
    }
    name.truncate(40);

    match name.chars().next() {
        None => "GeneratedProtocol".to_string(),
        Some(c) if c.is_ascii_digit() => format!("Protocol{}", name),
        Some(_) => name,
    }
}
