//! Prompt template for post analysis.

/// Template sent to the model. `{content}` is replaced with the post text.
pub const ANALYSIS_PROMPT: &str = r#"You are an expert social media and SEO content strategist. Review the post below and improve it for maximum engagement and search visibility.

Post:
---
{content}
---

Complete the following tasks and return the results as one JSON object with these keys:

1. "analysis": A short evaluation of the current post covering its strengths, weaknesses, tone, clarity, engagement potential and SEO effectiveness.
2. "recommendations": Specific, actionable suggestions to improve engagement, readability and SEO, as separate items. Include:
   - Keywords or hashtags to add
   - Calls-to-action (CTAs)
   - Formatting improvements (lists, headings, line breaks)
   - Tone adjustments where needed
3. "rewrite": A polished, engaging and SEO-friendly rewrite of the post that works the suggested keywords, hashtags and CTAs in naturally.

Constraints:
- Return strictly valid JSON with exactly the keys "analysis", "recommendations" and "rewrite"
- No commentary or any other text outside the JSON object
- Use clear and concise language
- Keep the rewrite readable with an attention-grabbing structure
"#;

/// Build the analysis prompt. The text is embedded verbatim.
pub fn build_prompt(text: &str) -> String {
    ANALYSIS_PROMPT.replace("{content}", text)
}
