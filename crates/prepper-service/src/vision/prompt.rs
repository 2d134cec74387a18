//! Instruction text sent alongside the images.

use chrono::NaiveDate;

use crate::language::Language;

const FIELDS: &str = "\
3. \"expirationDate\": EXPIRATION_SOURCE (format: YYYY-MM-DD), or null if not visible
4. \"category\": One of: WATER, CANNED_FOOD, DRY_GOODS, FIRST_AID, TOOLS, HYGIENE, DOCUMENTS, OTHER
5. \"confidence\": A number from 0 to 1 indicating how confident you are in the analysis";

const EXAMPLE: &str = "Return ONLY valid JSON, no other text. Example:\n\
{\"name\": \"Campbell's Chicken Noodle Soup\", \"description\": \"Canned soup, ready to heat and serve\", \"expirationDate\": \"2025-06-15\", \"category\": \"CANNED_FOOD\", \"confidence\": 0.95}";

/// Build the extraction instruction.
///
/// `with_expiration_image` selects the two-image wording, where the second
/// image is a close-up of the date stamp.
pub fn build_prompt(with_expiration_image: bool, language: Language, today: NaiveDate) -> String {
    let intro = if with_expiration_image {
        "You are analyzing two images of a food or emergency supply item:\n\
         - Image 1: The front/label of the product\n\
         - Image 2: The area showing the expiration/best-by date\n\n\
         Extract the following information and return it as JSON:"
    } else {
        "Analyze this image of a food or emergency supply item. \
         Extract the following information and return it as JSON:"
    };
    let expiration_source = if with_expiration_image {
        "The expiration date from image 2"
    } else {
        "The expiration date if visible"
    };
    let language_instruction = match language {
        Language::Da => "IMPORTANT: Write the name and description in Danish.",
        Language::En => "Write the name and description in English.",
    };
    let today = today.format("%Y-%m-%d");

    format!(
        "{intro}\n\n\
         1. \"name\": The product name (be specific, include brand if visible)\n\
         2. \"description\": A brief description of the item\n\
         {fields}\n\n\
         Note: Today's date is {today}. Expiration dates are almost never in the past \
         (users are scanning items they're adding to their inventory). If you read a date \
         that appears to be in the past, it's likely you misread it or it's a manufacturing \
         date, not an expiration date. Only return an expirationDate in the past if you are \
         absolutely certain.\n\n\
         {language_instruction}\n\n\
         {EXAMPLE}",
        fields = FIELDS.replace("EXPIRATION_SOURCE", expiration_source),
    )
}
