//! Prompt assembly.
//!
//! There is exactly one place the system instruction and the user payload
//! are built, so a policy or reference change always reaches the model the
//! same way.

use kosei_core::ConversionRequest;

/// Base system instruction sent with every request.
const BASE_INSTRUCTION: &str = "You are an expert proofreader for speech-transcribed text. \
Correct grammar, punctuation, and word segmentation while preserving the speaker's meaning \
and register. Respond with exactly one JSON object of the form \
{\"corrected_text\": \"...\"} and nothing else. No explanation, no code fences.";

/// Build the full system instruction for a request.
///
/// The policy and reference sections are appended in tagged blocks only when
/// non-empty, keeping the base instruction stable.
pub fn build_system_instruction(request: &ConversionRequest) -> String {
    let mut instruction = String::from(BASE_INSTRUCTION);
    if !request.policy().is_empty() {
        instruction.push_str("\n\n<conversion_policy>\n");
        instruction.push_str(request.policy());
        instruction.push_str("\n</conversion_policy>");
    }
    if !request.reference().is_empty() {
        instruction.push_str(
            "\n\nThe following is a style reference only. Match its tone and register; \
do not copy its content.\n<reference_text>\n",
        );
        instruction.push_str(request.reference());
        instruction.push_str("\n</reference_text>");
    }
    instruction
}

/// Build the user message payload.
///
/// Always a JSON object with a single `input_text` field, so the input can
/// never be mistaken for instructions.
pub fn build_user_payload(request: &ConversionRequest) -> String {
    serde_json::json!({ "input_text": request.input_text() }).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(input: &str, policy: &str, reference: &str) -> ConversionRequest {
        ConversionRequest::new(input, policy, reference).unwrap()
    }

    #[test]
    fn test_base_instruction_without_policy_or_reference() {
        let instruction = build_system_instruction(&request("text", "", ""));
        assert_eq!(instruction, BASE_INSTRUCTION);
        assert!(!instruction.contains("<conversion_policy>"));
        assert!(!instruction.contains("<reference_text>"));
    }

    #[test]
    fn test_policy_section_appended() {
        let instruction = build_system_instruction(&request("text", "keep honorifics", ""));
        assert!(instruction.starts_with(BASE_INSTRUCTION));
        assert!(instruction.contains("<conversion_policy>\nkeep honorifics\n</conversion_policy>"));
        assert!(!instruction.contains("<reference_text>"));
    }

    #[test]
    fn test_reference_section_appended() {
        let instruction = build_system_instruction(&request("text", "", "sample prose"));
        assert!(instruction.contains("<reference_text>\nsample prose\n</reference_text>"));
        assert!(instruction.contains("style reference only"));
    }

    #[test]
    fn test_both_sections_policy_first() {
        let instruction = build_system_instruction(&request("text", "policy", "reference"));
        let policy_at = instruction.find("<conversion_policy>").unwrap();
        let reference_at = instruction.find("<reference_text>").unwrap();
        assert!(policy_at < reference_at);
    }

    #[test]
    fn test_user_payload_is_json_object() {
        let payload = build_user_payload(&request("こんにちは 今日 は いい 天気 です", "", ""));
        let value: serde_json::Value = serde_json::from_str(&payload).unwrap();
        assert_eq!(value["input_text"], "こんにちは 今日 は いい 天気 です");
        assert_eq!(value.as_object().unwrap().len(), 1);
    }

    #[test]
    fn test_user_payload_escapes_quotes() {
        let payload = build_user_payload(&request(r#"he said "hi""#, "", ""));
        let value: serde_json::Value = serde_json::from_str(&payload).unwrap();
        assert_eq!(value["input_text"], r#"he said "hi""#);
    }
}
