use anyhow::{Result, bail};
use providertone_application::{GenerationOutcome, ToneSession};
use providertone_core::track::Track;

pub async fn drafts(session: &ToneSession, track: Track) -> Result<()> {
    let orchestrator = session.style_orchestrator()?;
    let outcomes = orchestrator.generate_all_drafts(track).await;

    let state = session.store().state();
    let mut failed = 0;
    for (id, outcome) in outcomes {
        match outcome {
            GenerationOutcome::Applied => {
                let draft = match track {
                    Track::Messaging => &state.messaging_profile.edit_capture.get(id.slot).original,
                    Track::Documentation => {
                        &state.documentation_profile.edit_capture.get(id.slot).original
                    }
                };
                println!("== {} ==\n{}\n", id, draft);
            }
            GenerationOutcome::Failed | GenerationOutcome::Superseded => {
                failed += 1;
                println!("== {} ==\n(draft generation failed, previous text kept)\n", id);
            }
        }
    }

    if failed > 0 {
        bail!("{} of 3 drafts did not complete; run the command again to retry", failed);
    }
    Ok(())
}

pub async fn profile(session: &ToneSession, track: Track) -> Result<()> {
    let orchestrator = session.style_orchestrator()?;

    match orchestrator.generate_profile(track).await {
        GenerationOutcome::Applied => {
            if let Some(profile) = session.store().state().generated_profile(track) {
                println!("{}", profile.voice_summary());
            }
            Ok(())
        }
        _ => bail!("{} profile was not generated; see the log for details", track),
    }
}
