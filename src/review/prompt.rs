/// Build the user prompt for one snippet. Output depends only on the inputs.
pub fn build_prompt(language: &str, code_snippet: &str) -> String {
    format!(
        r#"You are a strict senior software engineer performing a professional code review.

Analyze the following {language} code.

Return ONLY valid JSON with this exact structure:

{{
  "bugs": [
    {{
      "line": 10,
      "severity": "high",
      "description": "Bug explanation",
      "suggestion": "How to fix it"
    }}
  ],
  "optimizations": [
    {{
      "line": 15,
      "type": "performance",
      "description": "Optimization opportunity",
      "suggestion": "Improved approach"
    }}
  ],
  "best_practices": [
    {{
      "category": "readability",
      "description": "Best practice recommendation"
    }}
  ],
  "score": 0
}}

Rules:
- Score must be an integer from 0 to 100
- Be strict and realistic
- Use accurate line numbers
- If code quality is poor, score low
- Do NOT wrap the JSON in markdown code fences
- Do NOT include explanations or any text outside the JSON object

Code:
{code_snippet}
"#
    )
}
