//! Prompt construction for the assessment steps.
//!
//! Prompt content is data: each builder returns the ordered message
//! sequence for one generator call and encodes nothing but the request
//! wording and the expected JSON wire shape. Rationale text in the
//! guidelines follows IEC 61508 / ISO 26262 terminology.

use hara_model::ChatMessage;

/// Risk parameter definitions handed to the IEC 61508 rating step.
const IEC_PARAMETER_GUIDELINE: &str = r#"
C = "Severity / Consequence [C1: no injury, C2: minor injury, C3: major injury, C4: fatal injury]"
F = "Frequency of exposure [F1: rare exposure, F2: medium exposure, F3: regular exposure]"
P = "Possibility of avoiding the hazard [P1: possible >= 10%, P2: impossible < 10%]"
W = "Probability that external measures mitigate the hazard [W1, W2, W3]"
"#;

/// Classification guideline handed to the ISO 26262 rating step.
const ISO_CLASS_GUIDELINE: &str = r#"
Severity (S) of the resulting harm:
S0: no injuries or damage limited to the machinery itself,
S1: light and moderate injuries,
S2: severe and life-threatening injuries (survival probable),
S3: life-threatening injuries (survival uncertain) or fatal injuries.

Exposure (E), probability of the operational situation in which the
hazardous event can occur:
E0: incredible, E1: very low probability, E2: low probability,
E3: medium probability, E4: high probability.

Controllability (C), ability to avoid the harm through timely reactions:
C0: controllable in general,
C1: simply controllable (more than 99% of persons can avoid harm),
C2: normally controllable (90% to 99% can avoid harm),
C3: difficult to control or uncontrollable (less than 90% can avoid harm).

If classification is difficult, classify conservatively: whenever there is
reasonable doubt, choose the higher S, E, or C class. If the necessary
information cannot be derived at all, use UNKNOWN.
"#;

/// Request the annual injury statistics for the system's industry sector.
pub fn injury_statistics(system_description: &str) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(
            "You are a functional safety expert capable of retrieving sector accident \
             statistics. When given a specific system or industry description, you return \
             only the key annual injury statistics as structured data.",
        ),
        ChatMessage::user(format!(
            "System description: {system_description}\n\n\
             Provide the following as a JSON array ONLY with these keys:\n\
             [{{\n\
             \"Industry\": <industry>,\n\
             \"Total Number of workers\": <total_workers>,\n\
             \"Number of minor injuries per year\": <minor_injuries>,\n\
             \"Number of major injuries per year\": <major_injuries>,\n\
             \"Number of fatal injuries per year\": <fatal_injuries>\n\
             }}]\n\
             Do not include ANY explanation, markdown, or extra text."
        )),
    ]
}

/// Request the IEC 61508 risk parameter assignment for one hazard.
pub fn iec_parameters(hazard: &str) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(format!(
            "You are an expert functional safety engineer familiar with the IEC 61508 \
             standard and HARA analysis.\n\n\
             TASK:\n\
             - Assign the risk parameters below to the given hazard scenario.\n\
             - Include the assigned value and a short rationale for each parameter.\n\
             - If a value cannot be derived from the scenario, mark it as unknown.\n\n\
             RISK PARAMETERS:\n{IEC_PARAMETER_GUIDELINE}\n\
             OUTPUT REQUIREMENTS:\n\
             - Respond only with one valid JSON object in this format:\n\
             {{\n\
             \"hazard\": \"<the hazard scenario>\",\n\
             \"C\": {{\"value\": \"C1|C2|C3|C4\", \"reason\": \"<short explanation>\"}},\n\
             \"F\": {{\"value\": \"F1|F2|F3\", \"reason\": \"<short explanation>\"}},\n\
             \"P\": {{\"value\": \"P1|P2\", \"reason\": \"<short explanation>\"}},\n\
             \"W\": {{\"value\": \"W1|W2|W3\", \"reason\": \"<short explanation>\"}}\n\
             }}"
        )),
        ChatMessage::user(format!("Hazard scenario: {hazard}")),
    ]
}

/// Request the ISO 26262 S/E/C classification for one hazard.
pub fn iso_rating(hazard: &str) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(format!(
            "You are an expert functional safety engineer familiar with the ISO 26262 \
             standard and HARA analysis.\n\n\
             TASK:\n\
             - Classify the given hazard scenario using this guideline:\n{ISO_CLASS_GUIDELINE}\n\
             - Include the assigned value and a short reason for each class.\n\n\
             OUTPUT REQUIREMENTS:\n\
             - Respond only with one valid JSON object in this format:\n\
             {{\n\
             \"hazard\": \"<the hazard scenario>\",\n\
             \"Severity\": {{\"value\": \"S0|S1|S2|S3|UNKNOWN\", \"reason\": \"<short explanation>\"}},\n\
             \"Exposure\": {{\"value\": \"E0|E1|E2|E3|E4|UNKNOWN\", \"reason\": \"<short explanation>\"}},\n\
             \"Controllability\": {{\"value\": \"C0|C1|C2|C3|UNKNOWN\", \"reason\": \"<short explanation>\"}}\n\
             }}"
        )),
        ChatMessage::user(format!("Hazard scenario: {hazard}")),
    ]
}
