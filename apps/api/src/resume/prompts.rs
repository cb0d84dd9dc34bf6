// All LLM prompt constants for the resume tool.
// Reuses cross-cutting fragments from llm_client::prompts.

/// Editor prompt. The resume text is sent as a second part of the same turn.
/// The answer is the full resume with inline `[original]{suggestion}` edits.
pub const ANALYSIS_PROMPT: &str = r#"You are an expert resume editor. Review the entire resume and improve its professionalism, clarity, impact, and formatting, focusing on actionable improvements. When you replace text, wrap the original in [ ] and your improved replacement (phrase, sentence or multi-sentence) in { }. Examples:

• I [worked as a software engineer]{Served as a Software Engineer} at Google.
• [Objective: I am seeking a position…]{Objective: Strategic Art Administration professional with hands-on gallery experience and strong organizational skills.}

Guidelines:
1. Focus on high-impact revisions; avoid over-annotation.
2. Suggestions should be concise phrases or full sentences/paragraphs, as needed to convey a stronger, more professional alternative.
3. Use strong action verbs, quantify achievements with metrics, and ensure consistent formatting (dates, headings, bullet points).
4. Identify and correct vague language, clichés, and generic statements.
5. Flag or replace placeholders like [Year] with either actual dates or a clear prompt (e.g., "[complete date]").
6. Preserve key industry terms (e.g., "Art Administration," "Adobe Photoshop").
7. Prioritize clarity, conciseness, and impact in all suggestions.
8. Maintain a professional and sophisticated tone.
9. Return only the resume text with inline [original]{suggestion} edits, no extra commentary."#;

/// Scoring prompt. The resume text is sent as a second part.
/// Append `JSON_ONLY_INSTRUCTION` before sending.
pub const SCORING_PROMPT: &str = r#"You are a professional HR manager and resume expert. Analyze this resume and provide a comprehensive score based on key criteria.

Rate the resume on a scale of 0-100 for each criterion and provide specific feedback and improvements.

Return a JSON object with this EXACT schema:
{
  "overallScore": number,
  "criteria": [
    {"name": "Content Quality", "score": number, "feedback": "string", "improvements": ["string", "string"]},
    {"name": "Formatting & Structure", "score": number, "feedback": "string", "improvements": ["string", "string"]},
    {"name": "Professional Impact", "score": number, "feedback": "string", "improvements": ["string", "string"]},
    {"name": "Keyword Optimization", "score": number, "feedback": "string", "improvements": ["string", "string"]},
    {"name": "Completeness", "score": number, "feedback": "string", "improvements": ["string", "string"]}
  ]
}

Scoring Guidelines:
- Content Quality (0-100): Clarity, relevance, and impact of achievements
- Formatting & Structure (0-100): Professional layout, consistency, readability
- Professional Impact (0-100): Use of action verbs, quantified results, industry relevance
- Keyword Optimization (0-100): Inclusion of relevant industry keywords and skills
- Completeness (0-100): All necessary sections present and well-developed

Calculate overallScore as the average of all criteria scores."#;

/// Structuring prompt template. Replace `{resume_text}` before sending.
pub const STRUCTURE_PROMPT_TEMPLATE: &str = r#"Parse this resume into structured sections. Extract the following information in JSON format:
{
  "contact": {"name": "Full Name", "email": "email@example.com", "phone": "phone number", "location": "city, state"},
  "sections": [
    {
      "type": "experience|education|skills|projects|certifications",
      "title": "Job Title or Section Title",
      "subtitle": "Company Name or Institution",
      "content": "Detailed description or bullet points",
      "startDate": "MM/YYYY or Month Year",
      "endDate": "MM/YYYY or Month Year or Present",
      "location": "City, State (if applicable)"
    }
  ]
}

Instructions:
1. Extract contact information from the top of the resume.
2. Identify distinct sections (Experience, Education, Skills, Projects, etc.).
3. For each experience/education entry, extract start date, end date, and location if available.
4. Keep the content detailed but clean.
5. Use "Present" for current positions.

{json_only}

Resume content:
{resume_text}"#;
