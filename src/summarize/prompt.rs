//! Prompt template for the generative backend.

/// Build the bullet-summary prompt for one page.
pub fn build_prompt(query: &str, title: &str, url: &str, text: &str) -> String {
    format!(
        "You are a precise research assistant.
Summarize the page in 5 short bullet points (max 90 words total), focused on:
- facts relevant to the user query
- specific takeaways
- avoid fluff

User query: {query}
Page title: {title}
Page URL: {url}
Page text (truncated):
{text}

Output format:
- bullet 1
- bullet 2
- bullet 3
- bullet 4
- bullet 5
[Citation: {url}]
"
    )
}
