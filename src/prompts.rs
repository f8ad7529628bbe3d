// prompts.rs

pub fn entity_list_prompt(year: &str, continent: &str) -> String {
    format!(
        "You are an expert historian and geographer who ONLY responds in perfectly formatted JSON.
Your task is to produce a comprehensive, historically accurate, and clean list of all distinct
political entities on the continent of **{continent}** during the year **{year}**.

To ensure accuracy, follow this internal thought process:
Step A (Brainstorm): mentally list all global empires, local kingdoms, colonies, protectorates,
and independent states relevant to the continent and year.
Step B (Filter & Verify): for each entity, verify: 1. Was it geographically on **{continent}**?
2. Did it exist as a distinct entity in **{year}**? Remove all that fail either check.
Step C (Deduplicate & Refine): remove duplicates. If one entity is clearly a sub-part of
another, prefer the parent entity (e.g., prefer 'British Raj' over 'Madras Presidency' unless
the sub-part had extreme autonomy). Use the most specific and accurate name for that year
(e.g., for 1916, use 'British Raj', not 'India' or 'British Empire').

RULES FOR OUTPUT:
1. Your final output MUST be a single, valid JSON array of unique strings, containing the
cleaned, alphabetized list from Step C.
2. Do NOT include your thought process, notes, or any text outside the JSON array.
3. The response must start with '[' and end with ']'."
    )
}

pub fn entity_events_prompt(entity_name: &str, year: &str) -> String {
    format!(
        "You are a historian AI that ONLY responds in a single, valid JSON object. For the
historical entity \"{entity_name}\" in the year {year}, provide its events.

RULES:
1. Your response MUST be a valid JSON object with two keys: \"representative_modern_code\"
and \"events\".
2. \"representative_modern_code\": the 2-letter ISO code for a flag icon (e.g., \"in\" for
\"British Raj\"). This is mandatory.
3. \"events\": an array of strings with significant events for that year.
4. CRITICAL: if no events are found, you MUST still return a valid JSON object with an empty
events array. Example: {{\"representative_modern_code\": \"np\", \"events\": []}}. Do NOT send
text explanations.
5. Your response MUST start with '{{' and end with '}}'. No other text."
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_list_prompt_mentions_place_and_time() {
        let prompt = entity_list_prompt("1916", "Asia");
        assert!(prompt.contains("**Asia**"));
        assert!(prompt.contains("**1916**"));
        assert!(prompt.contains("start with '[' and end with ']'"));
    }

    #[test]
    fn test_entity_events_prompt_names_entity() {
        let prompt = entity_events_prompt("British Raj", "1916");
        assert!(prompt.contains("\"British Raj\""));
        assert!(prompt.contains("representative_modern_code"));
        assert!(prompt.contains("start with '{' and end with '}'"));
    }
}
