//! Prompt templates for widget generation. `{{...}}` placeholders are filled
//! in by `services::generation::prompt`.

/// Marker phrases that flag a rendering instruction as a style-preservation
/// request. Matched literally against the instruction text.
pub const STYLE_PRESERVATION_MARKER: &str = "CRITICAL STYLE PRESERVATION";
pub const CURRENT_STYLES_MARKER: &str = "CURRENT WIDGET STYLES";

pub const USER_REQUEST_PLACEHOLDER: &str = "{{USER_REQUEST}}";
pub const DATA_PLACEHOLDER: &str = "{{DATA}}";
pub const RENDER_INSTRUCTIONS_PLACEHOLDER: &str = "{{RENDER_INSTRUCTIONS}}";

pub const USER_PROMPT_TEMPLATE: &str = r#"Generate a complete, production-ready widget based on the following user request.

USER REQUEST:
{{USER_REQUEST}}

REQUIREMENTS:
- The widget should be visually appealing and fulfill the user's request
- Use modern CSS (flexbox/grid, responsive design)
- Ensure the widget is self-contained (all styles inline or in a <style> tag)
- Make it responsive and accessible
- Use semantic HTML
- The widget should be ready to inject into a dashboard
- CRITICAL: All CSS must be scoped to the widget content only - use class names that won't conflict with dashboard styles
- Avoid global styles, body/html selectors, or styles that affect elements outside the widget
- Use inline styles or scoped <style> tags within the widget HTML
- If the request requires real data (like weather, schedules, etc.), generate the widget with realistic/sample data that matches the request
- Make the widget functional and complete

IMPORTANT:
- Return COMPLETE, FUNCTIONAL HTML code with ALL content elements (divs, spans, text, etc.)
- Include the full HTML structure with styles AND the actual content
- Do not include any explanatory text, descriptions, or notes before or after the HTML
- The HTML must be complete and display actual content

Return the complete widget HTML code now:"#;

pub const USER_PROMPT_STYLE_TEMPLATE: &str = r#"Generate a complete, production-ready widget based on the following user request.

USER REQUEST:
{{USER_REQUEST}}

CRITICAL INSTRUCTIONS:
- Follow the style preservation requirements EXACTLY as specified above
- If CSS styles are provided in the request, USE THEM EXACTLY or create very similar styles
- Preserve colors, fonts, spacing, layout, and all visual properties
- Only update the content/data, NOT the styling
- Keep the same visual appearance and design aesthetic

REQUIREMENTS:
- The widget should be visually appealing and fulfill the user's request
- Use modern CSS (flexbox/grid, responsive design)
- Ensure the widget is self-contained (all styles inline or in a <style> tag)
- Make it responsive and accessible
- Use semantic HTML
- The widget should be ready to inject into a dashboard
- CRITICAL: All CSS must be scoped to the widget content only - use class names that won't conflict with dashboard styles
- Avoid global styles, body/html selectors, or styles that affect elements outside the widget
- Use inline styles or scoped <style> tags within the widget HTML
- If the request requires real data (like weather, schedules, etc.), generate the widget with realistic/sample data that matches the request
- Make the widget functional and complete

IMPORTANT:
- Return COMPLETE, FUNCTIONAL HTML code with ALL content elements (divs, spans, text, etc.)
- Include the full HTML structure with styles AND the actual content
- Do not include any explanatory text, descriptions, or notes before or after the HTML
- The HTML must be complete and display actual content
- PRESERVE THE STYLES AS SPECIFIED IN THE USER REQUEST

Return the complete widget HTML code now:"#;

pub const DATA_PROMPT_TEMPLATE: &str = r#"Generate a complete, production-ready widget based on the following data and rendering instructions.

DATA TO RENDER:
{{DATA}}

RENDERING INSTRUCTIONS:
{{RENDER_INSTRUCTIONS}}

REQUIREMENTS:
- The widget should be visually appealing and match the rendering instructions
- Use modern CSS (flexbox/grid, responsive design)
- Ensure the widget is self-contained (all styles inline or in a <style> tag)
- Make it responsive and accessible
- Use semantic HTML
- The widget should be ready to inject into a dashboard grid
- CRITICAL: All CSS must be scoped to the widget content only - use class names that won't conflict with dashboard styles
- Avoid global styles, body/html selectors, or styles that affect elements outside the widget
- Use inline styles or scoped <style> tags within the widget HTML

IMPORTANT:
- Return COMPLETE, FUNCTIONAL HTML code with ALL content elements (divs, spans, text, etc.)
- Include the full HTML structure with styles AND the actual content displaying the data
- Do not include any explanatory text, descriptions, or notes before or after the HTML
- The HTML must display the actual data values, not just styles

Return the complete widget HTML code now:"#;

pub const DATA_PROMPT_STYLE_TEMPLATE: &str = r#"Generate a complete, production-ready widget based on the following data and rendering instructions.

DATA TO RENDER:
{{DATA}}

RENDERING INSTRUCTIONS:
{{RENDER_INSTRUCTIONS}}

CRITICAL INSTRUCTIONS:
- Follow the style preservation requirements EXACTLY as specified above
- If CSS styles are provided in the rendering instructions, USE THEM EXACTLY or create very similar styles
- Preserve colors, fonts, spacing, layout, and all visual properties
- Only update the content/data, NOT the styling
- Keep the same visual appearance and design aesthetic

REQUIREMENTS:
- The widget should be visually appealing and match the rendering instructions
- Use modern CSS (flexbox/grid, responsive design)
- Ensure the widget is self-contained (all styles inline or in a <style> tag)
- Make it responsive and accessible
- Use semantic HTML
- The widget should be ready to inject into a dashboard grid
- CRITICAL: All CSS must be scoped to the widget content only - use class names that won't conflict with dashboard styles
- Avoid global styles, body/html selectors, or styles that affect elements outside the widget
- Use inline styles or scoped <style> tags within the widget HTML

IMPORTANT:
- Return COMPLETE, FUNCTIONAL HTML code with ALL content elements (divs, spans, text, etc.)
- Include the full HTML structure with styles AND the actual content displaying the data
- Do not include any explanatory text, descriptions, or notes before or after the HTML
- The HTML must display the actual data values, not just styles
- PRESERVE THE STYLES AS SPECIFIED IN THE RENDERING INSTRUCTIONS

Return the complete widget HTML code now:"#;

/// Appended to a widget's original instruction when a refresh should keep the
/// current look. The marker phrases above are deliberately part of this text.
pub const STYLE_PRESERVATION_REQUIREMENTS: &str = r#"

CRITICAL STYLE PRESERVATION REQUIREMENTS:
You MUST preserve the EXACT visual appearance and styling of the current widget.
- Keep the SAME colors, fonts, spacing, borders, shadows, and all visual properties
- Use the SAME CSS classes and styling patterns
- Maintain the SAME layout structure and component arrangement
- Preserve the SAME design aesthetic and visual hierarchy
- DO NOT change colors, sizes, or styling unless absolutely necessary
"#;
