//! Prompt text for draft generation and profile synthesis.

use providertone_core::generation::{DraftRequest, SynthesisRequest};
use providertone_core::track::Track;

const MESSAGING_DRAFT_INTRO: &str = "You are a medical provider drafting a portal message response. \
You should write in a professional yet personable style appropriate for patient communication.";

const DOCUMENTATION_DRAFT_INTRO: &str = "You are a medical provider drafting a clinical note section. \
You should write in a clinically precise style appropriate for the medical record.";

const MESSAGING_PROFILE_SCHEMA: &str = r#"{
  "surfacePatterns": {
    "greetings": "Description of their greeting pattern with 2-3 examples",
    "closings": "Description of their closing pattern with 2-3 examples",
    "lengthTendency": "short/medium/long and variation by message type",
    "paragraphStructure": "How they break up content",
    "punctuationPatterns": "Exclamation points, ellipses, dashes usage"
  },
  "toneDimensions": {
    "warmth": { "score": 1-10, "description": "Brief behavioral description" },
    "certainty": { "score": 1-10, "description": "Brief behavioral description" },
    "directiveness": { "score": 1-10, "description": "Brief behavioral description" },
    "formality": { "score": 1-10, "description": "Brief behavioral description" },
    "thoroughness": { "score": 1-10, "description": "Brief behavioral description" }
  },
  "negativeConstraints": {
    "neverUsePhrases": ["phrase 1", "phrase 2"],
    "neverUsePatterns": ["pattern 1", "pattern 2"],
    "avoid": ["thing to minimize 1", "thing to minimize 2"]
  },
  "judgmentPatterns": {
    "uncertaintyHandling": "How they express clinical uncertainty",
    "escalationStyle": "When triaging up, directive or collaborative",
    "decliningRequests": "How they say no",
    "emotionalResponsiveness": "Acknowledge emotions or address clinical content directly",
    "afterHoursApproach": "Do they adjust tone/length for late messages"
  },
  "signatureMoves": ["Distinctive pattern 1", "Distinctive pattern 2", "Pattern 3"],
  "voiceSummary": "3-4 sentence prose summary of this provider's voice",
  "exampleFragments": ["Example phrase 1", "Example phrase 2", "Example phrase 3"]
}"#;

const DOCUMENTATION_PROFILE_SCHEMA: &str = r#"{
  "structuralPatterns": {
    "noteOrganization": "SOAP, problem-oriented, or hybrid, and how strictly",
    "hpiConstruction": "Narrative vs. bulleted, chronology, level of detail",
    "assessmentSection": "How diagnoses and reasoning are presented",
    "planSection": "Organization and specificity of the plan",
    "physicalExam": "Comprehensive vs. focused, how normals are recorded",
    "ros": "How the review of systems is documented"
  },
  "voiceDimensions": {
    "verbosity": { "score": 1-10, "description": "Brief behavioral description" },
    "reasoningVisibility": { "score": 1-10, "description": "Brief behavioral description" },
    "formality": { "score": 1-10, "description": "Brief behavioral description" },
    "certaintyExpression": { "score": 1-10, "description": "Brief behavioral description" },
    "patientCenteredness": { "score": 1-10, "description": "Brief behavioral description" },
    "defensiveness": { "score": 1-10, "description": "Brief behavioral description" }
  },
  "negativeConstraints": {
    "neverUsePhrases": ["phrase 1", "phrase 2"],
    "neverUsePatterns": ["pattern 1", "pattern 2"],
    "avoid": ["thing to minimize 1", "thing to minimize 2"]
  },
  "standardPhrasings": {
    "hpiOpenings": ["Typical HPI opening 1", "Typical HPI opening 2"],
    "transitionPhrases": ["Transition 1", "Transition 2"],
    "assessmentLanguage": ["Assessment phrase 1", "Assessment phrase 2"],
    "planLanguage": ["Plan phrase 1", "Plan phrase 2"],
    "closingSafetyNet": ["Return precaution phrasing 1", "Return precaution phrasing 2"]
  },
  "visitTypeVariations": {
    "acuteVisits": "How acute visit notes differ",
    "chronicFollowUp": "How chronic follow-up notes differ",
    "wellVisits": "How well visit notes differ",
    "mentalHealth": "How mental health notes differ",
    "complexDiagnostic": "How diagnostically complex notes differ"
  },
  "signatureMoves": ["Distinctive pattern 1", "Distinctive pattern 2", "Pattern 3"],
  "voiceSummary": "3-4 sentence prose summary of this provider's documentation voice",
  "exampleFragments": ["Example phrase 1", "Example phrase 2", "Example phrase 3"]
}"#;

const SYNTHESIS_CLOSING: &str = "Be specific and concrete. Avoid generic descriptors. \
Ground everything in evidence from the interrogation data. \
Return ONLY valid JSON, no markdown or explanation.";

/// One line per piece of style evidence the provider has given so far.
pub fn draft_context_lines(request: &DraftRequest) -> Vec<String> {
    let mut lines = Vec::new();

    for example in &request.cold_responses {
        if !example.text.trim().is_empty() {
            lines.push(format!("{}: \"{}\"", example.label, example.text.trim()));
        }
    }

    for pair in &request.pair_selections {
        if let Some(style) = &pair.style {
            lines.push(format!("Prefers {} style for {}", style, pair.topic));
        }
        if let Some(edits) = pair.edits.as_deref().filter(|e| !e.trim().is_empty()) {
            lines.push(format!("Adjusted the preferred {} version: {}", pair.topic, edits.trim()));
        }
    }

    let anti = &request.anti_examples;
    if !anti.forbidden_phrases.trim().is_empty() {
        lines.push(format!("Never uses these phrases: {}", anti.forbidden_phrases.trim()));
    }
    let lists = [
        ("Avoids these closers", &anti.closers_never_used),
        ("Avoids these openers", &anti.openers_never_used),
        ("Avoids these patterns", &anti.patterns_avoided),
        ("Stylistic aversions", &anti.stylistic_aversions),
    ];
    for (lead, items) in lists {
        if !items.is_empty() {
            lines.push(format!("{}: {}", lead, items.join(", ")));
        }
    }
    if !anti.pet_peeves.trim().is_empty() {
        lines.push(format!("Pet peeves: {}", anti.pet_peeves.trim()));
    }

    lines
}

pub fn draft_system_prompt(request: &DraftRequest) -> String {
    let (intro, closing) = match request.track {
        Track::Messaging => (
            MESSAGING_DRAFT_INTRO,
            "Write a response to the incoming patient message that sounds natural and matches \
this provider's voice. Do not include any preamble or explanation. Just write the response \
as it would appear in the portal message.",
        ),
        Track::Documentation => (
            DOCUMENTATION_DRAFT_INTRO,
            "Write the note section for the clinical scenario so that it matches this provider's \
documentation voice. Do not include any preamble or explanation. Just write the note text \
as it would appear in the chart.",
        ),
    };

    format!(
        "{intro}\n\nBased on the provider's previous responses and preferences, match their \
communication style:\n\n{}\n\n{closing}",
        draft_context_lines(request).join("\n")
    )
}

pub fn draft_user_message(request: &DraftRequest) -> String {
    match request.track {
        Track::Messaging => format!(
            "Write a response to this incoming portal message:\n\n{}",
            request.incoming_message
        ),
        Track::Documentation => format!(
            "Write the documentation for this clinical scenario:\n\n{}",
            request.incoming_message
        ),
    }
}

pub fn synthesis_system_prompt(track: Track) -> String {
    let (subject, schema) = match track {
        Track::Messaging => (
            "a medical provider's communication style",
            MESSAGING_PROFILE_SCHEMA,
        ),
        Track::Documentation => (
            "a medical provider's clinical documentation style",
            DOCUMENTATION_PROFILE_SCHEMA,
        ),
    };
    let usage = match track {
        Track::Messaging => "generate portal message drafts in their voice",
        Track::Documentation => "generate clinical note drafts in their voice",
    };

    format!(
        "You are analyzing {subject} based on their responses to a structured interrogation. \
Your goal is to produce an accurate, nuanced style profile that will be used to {usage}.\n\n\
Analyze all inputs and produce a STYLE PROFILE with the following JSON structure:\n\n\
{schema}\n\n{SYNTHESIS_CLOSING}"
    )
}

pub fn synthesis_user_message(request: &SynthesisRequest) -> String {
    let subject = match request.track {
        Track::Messaging => "communication",
        Track::Documentation => "documentation",
    };
    format!(
        "Analyze this provider's {subject} style and generate their style profile:\n\n{}",
        request.brief
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use providertone_core::profile::*;
    use providertone_core::store::ProfileStore;

    fn messaging_request() -> DraftRequest {
        let mut store = ProfileStore::new();
        store.set_section(
            MessagingColdResponsesPatch::default()
                .scenario_1a("Fevers are common with viral illness.")
                .into(),
        );
        store.set_section(
            MessagingPairSelectionsPatch::default()
                .pair_2a(PairSelection::chosen(PairChoice::A).with_edits("drop the last line"))
                .into(),
        );
        store.set_section(
            MessagingAntiExamplesPatch::default()
                .forbidden_phrases("per my last message")
                .closers_never_used(vec!["Best,".to_string(), "Cheers!".to_string()])
                .into(),
        );
        DraftRequest::from_state(store.state(), "scenario4A".parse().unwrap())
    }

    #[test]
    fn test_context_lines() {
        let lines = draft_context_lines(&messaging_request());
        assert_eq!(
            lines,
            vec![
                "Example response to anxious parent: \"Fevers are common with viral illness.\""
                    .to_string(),
                "Prefers warm and thorough style for scenario type A".to_string(),
                "Adjusted the preferred scenario type A version: drop the last line".to_string(),
                "Never uses these phrases: per my last message".to_string(),
                "Avoids these closers: Best,, Cheers!".to_string(),
            ]
        );
    }

    #[test]
    fn test_draft_prompts_per_track() {
        let request = messaging_request();
        let system = draft_system_prompt(&request);
        assert!(system.starts_with("You are a medical provider drafting a portal message"));
        assert!(system.contains("Prefers warm and thorough style"));
        assert!(draft_user_message(&request).contains(&request.incoming_message));

        let doc = DraftRequest::from_state(
            ProfileStore::new().state(),
            "scenario5A".parse().unwrap(),
        );
        assert!(draft_system_prompt(&doc).contains("drafting a clinical note section"));
        assert!(draft_context_lines(&doc).is_empty());
    }

    #[test]
    fn test_synthesis_prompts() {
        let messaging = synthesis_system_prompt(Track::Messaging);
        assert!(messaging.contains("\"toneDimensions\""));
        assert!(messaging.ends_with("Return ONLY valid JSON, no markdown or explanation."));

        let documentation = synthesis_system_prompt(Track::Documentation);
        assert!(documentation.contains("\"structuralPatterns\""));
        assert!(documentation.contains("\"visitTypeVariations\""));

        let user = synthesis_user_message(&SynthesisRequest {
            track: Track::Documentation,
            brief: "## STRUCTURE PREFERENCES".into(),
        });
        assert!(user.ends_with("## STRUCTURE PREFERENCES"));
    }
}
