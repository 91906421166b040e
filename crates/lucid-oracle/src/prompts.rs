//! Prompt text sent to the oracle.

use lucid_core::SymbolRole;

/// A symbol to be named, as described to the oracle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameRequest {
    pub name: String,
    /// Space-joined type tokens; may be empty.
    pub type_description: String,
    pub role: SymbolRole,
}

impl NameRequest {
    pub fn new(
        name: impl Into<String>,
        type_description: impl Into<String>,
        role: SymbolRole,
    ) -> Self {
        Self {
            name: name.into(),
            type_description: type_description.into(),
            role,
        }
    }

    fn describe(&self) -> String {
        let kind = match self.role {
            SymbolRole::Argument => "argument",
            SymbolRole::Variable => "local variable",
        };
        if self.type_description.is_empty() {
            format!("{kind} `{}`", self.name)
        } else {
            format!("{kind} `{}` of type `{}`", self.name, self.type_description)
        }
    }
}

#[must_use]
pub fn summary_prompt(code: &str) -> String {
    format!(
        "The following C code was produced by a decompiler. Summarize what it does \
         in two or three sentences. Reply with the summary only.\n\n```c\n{code}\n```"
    )
}

/// Used in place of the summary exchange when summaries are disabled.
#[must_use]
pub fn context_prompt(code: &str) -> String {
    format!(
        "The following C code was produced by a decompiler. The variable names carry \
         no meaning. Read it; questions about it follow.\n\n```c\n{code}\n```"
    )
}

/// Points the following questions at one function of the input.
#[must_use]
pub fn function_prompt(function: &str, source: &str) -> String {
    format!("The next questions are about the function `{function}`:\n\n```c\n{source}\n```")
}

#[must_use]
pub fn new_name_prompt(request: &NameRequest) -> String {
    format!(
        "Suggest a better name for the {}, based on how the function uses it. \
         Use a short snake_case C identifier. Respond in JSON with the keys \
         \"new_name\" and \"reasoning\".",
        request.describe()
    )
}

#[must_use]
pub fn batch_prompt(function: &str, requests: &[NameRequest]) -> String {
    let list = requests
        .iter()
        .map(|r| format!("- {}", r.describe()))
        .collect::<Vec<_>>()
        .join("\n");
    format!(
        "Suggest better names for these variables of the function `{function}`, based on \
         how it uses them. Use short snake_case C identifiers.\n\n{list}\n\n\
         Respond in JSON as {{\"names\": {{\"old_name\": \"new_name\"}}}}, with one entry \
         per variable."
    )
}
