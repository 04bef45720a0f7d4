use anyhow::{Context, Result};
use providertone_application::ToneSession;
use providertone_core::gate;
use providertone_core::profile::SectionUpdate;
use providertone_core::track::Track;

pub fn status(session: &ToneSession) -> Result<()> {
    let state = session.store().state();

    for track in Track::ALL {
        let step = state.step(track);
        let step_title = track.step(step).map(|s| s.title).unwrap_or("?");
        println!("{} ({})", track.title(), track);
        println!("  Step {}/{}: {}", step, track.step_count(), step_title);

        let missing = gate::missing_fields(&state, track, step);
        if missing.is_empty() {
            println!("  Ready to continue");
        } else {
            println!("  Missing: {}", missing.join(", "));
        }

        match state.generated_profile(track) {
            Some(profile) => println!("  Profile: {}", profile.voice_summary()),
            None if gate::can_generate_profile(&state, track) => {
                println!("  Profile: not generated")
            }
            None => println!("  Profile: not generated (practice type required)"),
        }

        match state.completed_at(track) {
            Some(at) => println!("  Completed: {}", at.to_rfc3339()),
            None => println!("  Completed: no"),
        }
        println!();
    }

    Ok(())
}

pub fn answer(session: &ToneSession, track: Track, section: &str, patch: &str) -> Result<()> {
    let patch: serde_json::Value =
        serde_json::from_str(patch).context("Answer patch must be a JSON object")?;
    let update = SectionUpdate::from_json(track, section, patch)?;
    if update.is_empty() {
        println!("Nothing to change in {} {}", track, section);
        return Ok(());
    }

    let state = session.store().set_section(update);
    let step = state.step(track);
    let missing = gate::missing_fields(&state, track, step);
    println!("Updated {} {}", track, section);
    if !missing.is_empty() {
        println!("  Step {} still missing: {}", step, missing.join(", "));
    }
    Ok(())
}

pub fn gate(session: &ToneSession, track: Track, step: u32) -> Result<()> {
    track.check_step(step)?;
    let state = session.store().state();
    let missing = gate::missing_fields(&state, track, step);

    if missing.is_empty() {
        println!("{} step {}: complete", track, step);
    } else {
        println!("{} step {}: missing", track, step);
        for field in missing {
            println!("  - {}", field);
        }
    }
    Ok(())
}

pub fn set_step(session: &ToneSession, track: Track, step: u32) -> Result<()> {
    session.store().set_step(track, step)?;
    let title = track.step(step).map(|s| s.title).unwrap_or_default();
    println!("{} is now on step {}: {}", track, step, title);
    Ok(())
}

pub fn complete(session: &ToneSession, track: Track) -> Result<()> {
    let newly_completed = session.store().complete(track);
    let at = session
        .store()
        .state()
        .completed_at(track)
        .map(|at| at.to_rfc3339())
        .unwrap_or_default();

    if newly_completed {
        println!("{} completed at {}", track, at);
    } else {
        println!("{} was already completed at {}", track, at);
    }
    Ok(())
}

pub fn reset(session: &ToneSession) -> Result<()> {
    session.store().reset_all();
    println!("All answers cleared");
    Ok(())
}
