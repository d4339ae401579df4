// src/prompt.rs
use serde_json::{json, Value};

use crate::models::EvaluationStatus;

/// Builds the grading instruction for one submission/rubric pair.
///
/// Pure: the output depends only on the two texts, which are embedded verbatim.
pub fn build_prompt(submission_text: &str, rubric_text: &str) -> String {
    let statuses = EvaluationStatus::ALL
        .iter()
        .map(|s| format!("'{}'", s.as_str()))
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        r#"
You are an expert academic assistant specializing in evaluating student work against provided rubrics. Your goal is to provide a detailed, objective, and constructive analysis. You MUST respond ONLY with the JSON object that adheres to the provided schema.

Here is the grading rubric:
---
{rubric}
---

Here is the student's activity submission:
---
{submission}
---

Please perform the following tasks:
1.  Carefully read the student's submission.
2.  Analyze the submission against each criterion listed in the rubric, independently of the others.
3.  For each criterion, determine if it is one of: {statuses}.
4.  Assign a numerical score from 0 to 100 for each criterion based on the level of fulfillment.
5.  Provide a specific quote from the student's text as a 'justification' for your evaluation. If a criterion is not met and no text applies, briefly explain the omission.
6.  Offer a concise and actionable 'suggestion' for improvement for each criterion.
7.  Write a brief 'overallFeedback' paragraph summarizing the work's strengths and key areas for improvement.
8.  Calculate an 'overallScore' which should be the average of all individual criterion scores.
9.  Generate a JSON object containing the full evaluation, including scores.

The JSON object must have exactly these fields, all required:
- "evaluation": array of objects, one per rubric criterion in rubric order, each with
  "criterion" (string), "status" (string, one of {statuses}), "score" (number),
  "justification" (string), "suggestion" (string)
- "overallScore": number
- "overallFeedback": string
"#,
        rubric = rubric_text,
        submission = submission_text,
        statuses = statuses,
    )
}

/// Response schema in the Gemini `responseSchema` dialect.
pub fn response_schema() -> Value {
    let status_literals: Vec<&str> = EvaluationStatus::ALL.iter().map(|s| s.as_str()).collect();

    json!({
        "type": "OBJECT",
        "properties": {
            "evaluation": {
                "type": "ARRAY",
                "description": "An array of evaluations for each criterion.",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "criterion": {
                            "type": "STRING",
                            "description": "The name or description of the evaluation criterion from the rubric."
                        },
                        "status": {
                            "type": "STRING",
                            "format": "enum",
                            "enum": status_literals,
                            "description": "Evaluation status. Must be one of: 'FULFILLED', 'PARTIALLY_FULFILLED', 'NOT_FULFILLED'."
                        },
                        "score": {
                            "type": "NUMBER",
                            "description": "A numerical score from 0 to 100 representing how well the criterion was met."
                        },
                        "justification": {
                            "type": "STRING",
                            "description": "A direct quote from the student's activity that supports the evaluation status. If no specific text applies, explain why."
                        },
                        "suggestion": {
                            "type": "STRING",
                            "description": "A constructive comment for improvement related to this criterion."
                        }
                    },
                    "required": ["criterion", "status", "score", "justification", "suggestion"]
                }
            },
            "overallScore": {
                "type": "NUMBER",
                "description": "A final, overall numerical score from 0 to 100 for the entire submission, calculated as an average of the individual criterion scores."
            },
            "overallFeedback": {
                "type": "STRING",
                "description": "A summary of overall feedback and general suggestions for improving the entire activity."
            }
        },
        "required": ["evaluation", "overallScore", "overallFeedback"]
    })
}
