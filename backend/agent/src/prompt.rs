//! Instruction text sent ahead of the receipt image.

pub const RECEIPT_PROMPT: &str = "
Extract structured data from the receipt image provided.
The output should be in a clean JSON format, adhering to the provided schema.

Instructions:
- Extract the vendor name, date, total amount, and all line items from the image.
- The date should be in YYYY-MM-DD format.
- Each item should have a name, quantity, and price.
- If a value is not present in the text, do not include the key in the output.
";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_covers_every_field() {
        for field in ["vendor", "date", "total", "line items", "quantity", "price"] {
            assert!(RECEIPT_PROMPT.contains(field), "prompt is missing {field}");
        }
        assert!(RECEIPT_PROMPT.contains("YYYY-MM-DD"));
    }
}
