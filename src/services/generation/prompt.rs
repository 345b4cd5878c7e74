use serde_json::Value;

use crate::constants::prompts::{
    CURRENT_STYLES_MARKER, DATA_PLACEHOLDER, DATA_PROMPT_STYLE_TEMPLATE, DATA_PROMPT_TEMPLATE,
    RENDER_INSTRUCTIONS_PLACEHOLDER, STYLE_PRESERVATION_MARKER, STYLE_PRESERVATION_REQUIREMENTS,
    USER_PROMPT_STYLE_TEMPLATE, USER_PROMPT_TEMPLATE, USER_REQUEST_PLACEHOLDER,
};

use super::extract::collect_style_blocks;

/// True when the instruction carries one of the literal style-preservation
/// markers appended by `append_style_preservation`.
pub fn has_style_preservation(instruction: &str) -> bool {
    instruction.contains(STYLE_PRESERVATION_MARKER) || instruction.contains(CURRENT_STYLES_MARKER)
}

fn is_empty_payload(data: &Value) -> bool {
    match data {
        Value::Null => true,
        Value::Object(map) => map.is_empty(),
        _ => false,
    }
}

/// Build the completion prompt. Two independent switches select between four
/// templates: whether a data payload is present, and whether the instruction
/// asks for the current styles to be preserved.
pub fn build_generation_prompt(data: &Value, instruction: &str, user_authored: bool) -> String {
    let preserve_styles = has_style_preservation(instruction);

    if user_authored || is_empty_payload(data) {
        let template = if preserve_styles {
            USER_PROMPT_STYLE_TEMPLATE
        } else {
            USER_PROMPT_TEMPLATE
        };
        template.replace(USER_REQUEST_PLACEHOLDER, instruction)
    } else {
        let template = if preserve_styles {
            DATA_PROMPT_STYLE_TEMPLATE
        } else {
            DATA_PROMPT_TEMPLATE
        };
        let rendered_data =
            serde_json::to_string_pretty(data).unwrap_or_else(|_| data.to_string());
        template
            .replace(DATA_PLACEHOLDER, &rendered_data)
            .replace(RENDER_INSTRUCTIONS_PLACEHOLDER, instruction)
    }
}

/// Extend a widget's original instruction with the style-preservation block,
/// embedding the CSS currently shipped with the widget so a refresh keeps the
/// established look.
pub fn append_style_preservation(original_instruction: &str, current_html: &str) -> String {
    let mut instruction = format!("{original_instruction}{STYLE_PRESERVATION_REQUIREMENTS}");

    let style_blocks = collect_style_blocks(current_html);
    if !style_blocks.is_empty() {
        instruction.push_str("\nCURRENT WIDGET STYLES (preserve these):\n```css\n");
        for block in &style_blocks {
            instruction.push_str(block);
            instruction.push('\n');
        }
        instruction.push_str("```\n");
        instruction.push_str(
            "\nIMPORTANT: Use these exact styles or very similar ones. Match the color scheme, typography, spacing, and visual design.\n",
        );
    }

    instruction
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn user_prompt_embeds_the_request() {
        let prompt = build_generation_prompt(&json!({}), "a clock widget", true);
        assert!(prompt.contains("USER REQUEST:\na clock widget"));
        assert!(!prompt.contains("DATA TO RENDER"));
        assert!(!prompt.contains("{{"));
    }

    #[test]
    fn empty_payload_is_treated_as_a_user_prompt() {
        let prompt = build_generation_prompt(&json!({}), "a clock widget", false);
        assert!(prompt.contains("USER REQUEST:"));
        assert!(!prompt.contains("RENDERING INSTRUCTIONS"));
    }

    #[test]
    fn data_prompt_embeds_pretty_printed_payload() {
        let data = json!({"temperature": 21.5, "unit": "C"});
        let prompt = build_generation_prompt(&data, "show the temperature", false);
        assert!(prompt.contains("DATA TO RENDER:"));
        assert!(prompt.contains("\"temperature\": 21.5"));
        assert!(prompt.contains("RENDERING INSTRUCTIONS:\nshow the temperature"));
        assert!(!prompt.contains("{{"));
    }

    #[test]
    fn style_preservation_marker_switches_templates() {
        let instruction = format!("redraw it{STYLE_PRESERVATION_REQUIREMENTS}");
        assert!(has_style_preservation(&instruction));

        let prompt = build_generation_prompt(&json!({}), &instruction, true);
        assert!(prompt.contains("PRESERVE THE STYLES AS SPECIFIED IN THE USER REQUEST"));

        let prompt = build_generation_prompt(&json!({"a": 1}), &instruction, false);
        assert!(prompt.contains("PRESERVE THE STYLES AS SPECIFIED IN THE RENDERING INSTRUCTIONS"));
    }

    #[test]
    fn plain_instruction_uses_the_normal_templates() {
        assert!(!has_style_preservation("render a table"));
        let prompt = build_generation_prompt(&json!({"a": 1}), "render a table", false);
        assert!(!prompt.contains("PRESERVE THE STYLES"));
    }

    #[test]
    fn append_style_preservation_embeds_current_css() {
        let html = "<style>.card{color:teal}</style><div class=\"card\">x</div>";
        let instruction = append_style_preservation("show a card", html);

        assert!(instruction.starts_with("show a card"));
        assert!(instruction.contains("CRITICAL STYLE PRESERVATION REQUIREMENTS"));
        assert!(instruction.contains("CURRENT WIDGET STYLES (preserve these):"));
        assert!(instruction.contains(".card{color:teal}"));
        assert!(has_style_preservation(&instruction));
    }

    #[test]
    fn append_style_preservation_without_styles_skips_the_css_block() {
        let instruction = append_style_preservation("show a card", "<div>no styles here</div>");
        assert!(instruction.contains("CRITICAL STYLE PRESERVATION REQUIREMENTS"));
        assert!(!instruction.contains("CURRENT WIDGET STYLES"));
        // the requirements block alone still marks the instruction
        assert!(has_style_preservation(&instruction));
    }
}
