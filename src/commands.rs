use std::collections::BTreeSet;
use std::process::ExitCode;

use chrono::NaiveDate;

use crate::api::{Client, Credentials, Error};
use crate::cli::Command;
use crate::config::Config;
use crate::schedule::{
    self, AssignmentEditor, Conflict, EquipmentId, ScheduleMap, SessionId,
};

pub fn run(config: &Config, command: Command) -> ExitCode {
    let client = Client::new(Credentials::from(&config.api), config.api.url.clone());

    let result = match command {
        Command::Sessions { from, to } => sessions(&client, from, to),
        Command::Equipment { all } => equipment(config, &client, all),
        Command::Check { session, equipment } => check(config, &client, session, &equipment),
        Command::Assign { session, equipment } => assign(config, &client, session, &equipment),
        Command::Announcements => announcements(&client),
        Command::Absences { from, to } => absences(&client, from, to),
    };

    result.unwrap_or_else(|e| {
        log::error!("Command failed: {e}");
        eprintln!("{e}");
        ExitCode::FAILURE
    })
}

fn window(from: Option<NaiveDate>, to: Option<NaiveDate>) -> (NaiveDate, NaiveDate) {
    let start = from.unwrap_or_else(schedule::today);
    let end = to.unwrap_or(start + chrono::Months::new(1));

    (start, end)
}

fn sessions(client: &Client, from: Option<NaiveDate>, to: Option<NaiveDate>) -> Result<ExitCode, Error> {
    let (start, end) = window(from, to);
    let sessions = client.sessions_between(start, end)?;

    if sessions.is_empty() {
        println!("No sessions between {start} and {end}.");
        return Ok(ExitCode::SUCCESS);
    }

    for session in &sessions {
        let when = session.window_localized().unwrap_or_else(|| {
            format!(
                "{} (no time set)",
                session.date.format_localized("%b %e.", chrono::Locale::hu_HU)
            )
        });

        let mut extras = Vec::new();

        if !session.location_name().is_empty() {
            extras.push(session.location_name().to_string());
        }

        if let Some(session_type) = &session.session_type {
            extras.push(session_type.clone());
        }

        if !session.equipment_ids.is_empty() {
            extras.push(format!("{} items", session.equipment_ids.len()));
        }

        let extras = if extras.is_empty() {
            String::new()
        } else {
            format!("  ({})", extras.join(", "))
        };

        println!("{:>5}  {:<24}  {}{}", session.id, when, session.name, extras);
    }

    Ok(ExitCode::SUCCESS)
}

fn equipment(config: &Config, client: &Client, all: bool) -> Result<ExitCode, Error> {
    let items = client.equipment(!all && config.schedule.functional_only)?;

    for item in &items {
        let status = if item.functional { "" } else { "  [out of order]" };

        println!("{:>5}  {:<2} {}{}", item.id, item.type_glyph(), item.label(), status);
    }

    Ok(ExitCode::SUCCESS)
}

fn check(
    config: &Config,
    client: &Client,
    session: u32,
    equipment: &[u32],
) -> Result<ExitCode, Error> {
    let target = client.session(SessionId(session))?;

    if target.span().is_none() {
        println!("Session {} has no valid time window; nothing to check.", target.id);
        return Ok(ExitCode::SUCCESS);
    }

    let map = client.fetch_map(target.date, config.schedule.window_months, false)?;

    let candidates: BTreeSet<EquipmentId> = if equipment.is_empty() {
        target.equipment_ids.iter().copied().collect()
    } else {
        equipment.iter().copied().map(EquipmentId).collect()
    };

    let conflicts = schedule::check_conflicts(&target, &candidates, map.sessions());

    if conflicts.is_empty() {
        println!(
            "No conflicts for \"{}\" ({} candidate items).",
            target.name,
            candidates.len()
        );
        return Ok(ExitCode::SUCCESS);
    }

    print_conflicts(&conflicts, &map);
    Ok(ExitCode::FAILURE)
}

fn assign(
    config: &Config,
    client: &Client,
    session: u32,
    equipment: &[u32],
) -> Result<ExitCode, Error> {
    let auth = client.me()?;
    let target = client.session(SessionId(session))?;

    // Conflict detection does not depend on the inventory filter; items
    // outside the fetched inventory only lose their display labels.
    let map = client.fetch_map(
        target.date,
        config.schedule.window_months,
        config.schedule.functional_only,
    )?;

    let mut editor = AssignmentEditor::new(target, &map);
    editor.set_selection(equipment.iter().copied().map(EquipmentId), &map);

    println!(
        "Target: {} \"{}\" ({})",
        editor.target().id,
        editor.target().name,
        editor
            .target()
            .window_localized()
            .unwrap_or_else(|| "no time set".to_string())
    );

    for id in editor.selected() {
        if map.equipment(*id).is_none() {
            log::warn!("Equipment {id} is not in the fetched inventory");
        }
    }

    let request = match editor.begin_submit(&auth) {
        Ok(request) => request,
        Err(blocked) => {
            print_conflicts(editor.conflicts(), &map);
            eprintln!("Not submitting: {blocked}");
            return Ok(ExitCode::FAILURE);
        }
    };

    match client.update_session_equipment(request.session_id, &request.equipment_ids) {
        Ok(saved) => {
            let summary = request.change.summary(map.inventory());
            editor.complete_submit(&saved);
            println!("Saved \"{}\": {summary}", saved.name);
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            // Pending flag cleared so the user may simply rerun the command.
            editor.fail_submit();
            log::error!("Assignment update rejected: {e}");
            eprintln!("Save failed: {e}");
            Ok(ExitCode::FAILURE)
        }
    }
}

fn announcements(client: &Client) -> Result<ExitCode, Error> {
    let list = client.announcements()?;

    if list.is_empty() {
        println!("No announcements.");
        return Ok(ExitCode::SUCCESS);
    }

    for announcement in &list {
        println!(
            "[{}] {} ({})",
            announcement.created_localized(),
            announcement.title,
            announcement.author
        );
        println!("    {}", announcement.body);
    }

    Ok(ExitCode::SUCCESS)
}

fn absences(client: &Client, from: Option<NaiveDate>, to: Option<NaiveDate>) -> Result<ExitCode, Error> {
    let auth = client.me()?;

    if !auth.can_view_absences() {
        eprintln!("Absence listing requires class-teacher or admin rights.");
        return Ok(ExitCode::FAILURE);
    }

    let (start, end) = window(from, to);

    for absence in client.absences_between(start, end)? {
        println!(
            "{:>5}  {} - {}  {}  ({})",
            absence.id, absence.date_from, absence.date_to, absence.student, absence.state
        );
    }

    Ok(ExitCode::SUCCESS)
}

fn print_conflicts(conflicts: &[Conflict], map: &ScheduleMap) {
    for conflict in conflicts {
        let label = map
            .equipment(conflict.equipment_id)
            .map_or_else(|| conflict.equipment_id.to_string(), |item| item.label());

        println!(
            "CONFLICT  {label}: also booked by \"{}\" ({})",
            conflict.session_name,
            conflict.span.localized()
        );
    }
}
