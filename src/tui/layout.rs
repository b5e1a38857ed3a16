/// Rows used by everything except the prompt and output text:
/// header, spacers, text-area borders, tool row, tag rows, footer and toast.
pub const FIXED_CHROME: u16 = 15;

/// Text rows available to the two text areas never drop below this.
pub const MIN_AVAILABLE: u16 = 5;
pub const MIN_PROMPT_HEIGHT: u16 = 3;
pub const MIN_OUTPUT_HEIGHT: u16 = 2;

/// Inner heights of the prompt and output areas for a terminal `height`
/// rows tall. The prompt gets 60% of what the chrome leaves; the output
/// gets the rest.
pub fn field_heights(height: u16) -> (u16, u16) {
    let available = height.saturating_sub(FIXED_CHROME).max(MIN_AVAILABLE);
    let prompt = (available as u32 * 60 / 100) as u16;
    let prompt = prompt.max(MIN_PROMPT_HEIGHT);
    let output = available.saturating_sub(prompt).max(MIN_OUTPUT_HEIGHT);
    (prompt, output)
}
