use std::fmt::Write;

use super::{GRID_HOURS, HOUR_HEIGHT, block_geometry, format_hour};
use crate::models::event::{CalendarEvent, DAY_NAMES};
use crate::models::preference::{ActivityTiming, LunchTiming, Preferences, StudyTiming};
use crate::service::edit;
use crate::service::planner::PlannerSnapshot;

const STYLE: &str = r#"
body { font-family: system-ui, sans-serif; background: #f9fafb; color: #1f2937; margin: 0; padding: 2rem; }
.layout { display: grid; grid-template-columns: 320px 1fr; gap: 2rem; max-width: 72rem; margin: 0 auto; }
.panel { background: #fff; border: 1px solid #e5e7eb; border-radius: 8px; padding: 1rem; margin-bottom: 1.5rem; }
.profile { color: #4f46e5; font-weight: 600; font-size: 0.9rem; }
.grid { position: relative; display: grid; grid-template-columns: 60px 1fr; border: 1px solid #e5e7eb; border-radius: 8px; background: #fff; overflow: hidden; }
.days { display: grid; grid-template-columns: 60px repeat(7, 1fr); background: #f9fafb; border-bottom: 1px solid #e5e7eb; }
.days div { text-align: center; padding: 0.75rem 0; font-weight: 600; font-size: 0.85rem; color: #4b5563; }
.hours div { height: 60px; font-size: 0.7rem; color: #6b7280; text-align: right; padding-right: 0.5rem; }
.week { position: relative; }
.row { height: 60px; border-top: 1px solid #f3f4f6; }
.event { position: absolute; border-radius: 8px; padding: 0.4rem; color: #fff; font-size: 0.75rem; overflow: hidden; cursor: pointer; box-sizing: border-box; }
.empty { border: 2px dashed #d1d5db; border-radius: 8px; padding: 4rem 1rem; text-align: center; color: #6b7280; }
dialog { border: none; border-radius: 8px; padding: 1.5rem; }
.bg-blue-600 { background: #2563eb; } .bg-green-600 { background: #16a34a; } .bg-orange-500 { background: #f97316; }
.bg-purple-600 { background: #9333ea; } .bg-teal-500 { background: #14b8a6; } .bg-pink-500 { background: #ec4899; }
"#;

const SCRIPT: &str = r#"
async function call(method, url, body) {
  const res = await fetch(url, { method, headers: { 'Content-Type': 'application/json' }, body: body ? JSON.stringify(body) : undefined });
  if (!res.ok) { console.error(await res.text()); }
  return res;
}
async function submitText() {
  const input = document.getElementById('request');
  const text = input.value.trim();
  if (!text) return;
  const button = document.getElementById('send');
  input.disabled = true; button.disabled = true; button.textContent = '...';
  try { await call('POST', '/api/events/text', { text }); } finally { location.reload(); }
}
async function generateProfile() { await call('POST', '/api/profile'); location.reload(); }
async function setPreference(axis, value) { const body = {}; body[axis] = value; await call('PUT', '/api/preferences', body); location.reload(); }
function openEditor(id, title, day, start) {
  const dialog = document.getElementById('editor');
  dialog.dataset.id = id;
  document.getElementById('editor-title').textContent = 'Edit event: ' + title;
  document.getElementById('edit-day').value = String(day);
  document.getElementById('edit-start').value = String(Math.floor(start));
  dialog.showModal();
}
async function saveEdit() {
  const dialog = document.getElementById('editor');
  const day = Number(document.getElementById('edit-day').value);
  const startHour = Number(document.getElementById('edit-start').value);
  await call('PUT', '/api/events/' + encodeURIComponent(dialog.dataset.id), { day, startHour });
  location.reload();
}
document.addEventListener('DOMContentLoaded', () => {
  document.getElementById('request').addEventListener('keydown', (e) => { if (e.key === 'Enter') submitText(); });
});
"#;

pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Escapes a value for a single-quoted JS string inside an HTML attribute.
fn escape_js_attr(raw: &str) -> String {
    let js = raw.replace('\\', "\\\\").replace('\'', "\\'");
    escape_html(&js)
}

fn radio(out: &mut String, axis: &str, value: &str, label: &str, checked: bool) {
    let _ = write!(
        out,
        "<label><input type=\"radio\" name=\"{axis}\" value=\"{value}\"{checked} onchange=\"setPreference('{axis}', '{value}')\"> {label}</label> ",
        checked = if checked { " checked" } else { "" },
    );
}

fn preference_panels(out: &mut String, prefs: &Preferences) {
    out.push_str("<div class=\"panel\"><h3>Physical Activity</h3>");
    radio(out, "activity", "morning", "Morning", prefs.activity == ActivityTiming::Morning);
    radio(out, "activity", "evening", "Evening", prefs.activity == ActivityTiming::Evening);
    out.push_str("</div><div class=\"panel\"><h3>Lunch</h3>");
    radio(out, "lunch", "early", "Early", prefs.lunch == LunchTiming::Early);
    radio(out, "lunch", "late", "Late", prefs.lunch == LunchTiming::Late);
    out.push_str("</div><div class=\"panel\"><h3>Study/Reading</h3>");
    radio(out, "study", "after_work", "After work", prefs.study == StudyTiming::AfterWork);
    radio(out, "study", "night", "Night", prefs.study == StudyTiming::Night);
    out.push_str("</div>");
}

fn event_block(out: &mut String, event: &CalendarEvent) {
    let geometry = block_geometry(event);
    let _ = write!(
        out,
        "<div class=\"event {color}\" style=\"top:{top}px;height:{height}px;left:calc({left}% + 4px);width:calc({width}% - 8px)\" \
         onclick=\"openEditor('{id}', '{js_title}', {day}, {start})\"><strong>{title}</strong><div>{from} - {to}</div></div>",
        color = escape_html(&event.color),
        top = geometry.top_px + 2.0,
        height = geometry.height_px,
        left = geometry.left_pct,
        width = geometry.width_pct,
        id = escape_js_attr(&event.id),
        js_title = escape_js_attr(&event.title),
        day = event.day,
        start = event.start_hour,
        title = escape_html(&event.title),
        from = format_hour(event.start_hour),
        to = format_hour(event.end_hour),
    );
}

fn calendar(out: &mut String, events: &[CalendarEvent]) {
    if events.is_empty() {
        out.push_str(
            "<div class=\"empty\"><h3>Your calendar is empty</h3>\
             <p>Use the panel on the left to generate your schedule.</p></div>",
        );
        return;
    }

    out.push_str("<div class=\"days\"><div></div>");
    for name in DAY_NAMES {
        let _ = write!(out, "<div>{}</div>", name);
    }
    out.push_str("</div><div class=\"grid\"><div class=\"hours\">");
    for hour in GRID_HOURS {
        let _ = write!(out, "<div>{}</div>", format_hour(f64::from(hour)));
    }
    let _ = write!(
        out,
        "</div><div class=\"week\" style=\"height:{}px\">",
        GRID_HOURS.len() as f64 * HOUR_HEIGHT
    );
    for _ in GRID_HOURS {
        out.push_str("<div class=\"row\"></div>");
    }
    for event in events {
        event_block(out, event);
    }
    out.push_str("</div></div>");
}

fn edit_dialog(out: &mut String) {
    out.push_str(
        "<dialog id=\"editor\"><h3 id=\"editor-title\">Edit event</h3>\
         <p><label>Day <select id=\"edit-day\">",
    );
    for (index, name) in DAY_NAMES.iter().enumerate() {
        let _ = write!(out, "<option value=\"{}\">{}</option>", index, name);
    }
    out.push_str("</select></label></p><p><label>Start hour <select id=\"edit-start\">");
    for hour in edit::start_hour_options() {
        let _ = write!(out, "<option value=\"{hour}\">{hour}:00</option>");
    }
    out.push_str(
        "</select></label></p>\
         <button type=\"button\" onclick=\"document.getElementById('editor').close()\">Cancel</button> \
         <button type=\"button\" onclick=\"saveEdit()\">Save changes</button></dialog>",
    );
}

/// The whole planner page for the given state.
pub fn render_page(snapshot: &PlannerSnapshot, speech_supported: bool) -> String {
    let mut out = String::with_capacity(16 * 1024);
    let _ = write!(
        out,
        "<!DOCTYPE html><html lang=\"en\"><head><meta charset=\"utf-8\">\
         <title>Your Weekly Planner</title><style>{STYLE}</style><script>{SCRIPT}</script></head><body>\
         <header><h1>Your Weekly Planner</h1><p>Tell me what to plan or adjust your preferences to get started.</p>"
    );
    if let Some(profile) = &snapshot.profile {
        let _ = write!(out, "<p class=\"profile\">{}</p>", escape_html(profile));
    }
    out.push_str("</header><div class=\"layout\"><aside>");

    out.push_str("<div class=\"panel\"><h3>Add or generate your plan</h3>");
    out.push_str("<input id=\"request\" placeholder=\"Add an event (e.g. 'Meeting tomorrow 3pm')\"> ");
    let _ = write!(
        out,
        "<button type=\"button\" title=\"Dictate\"{}>Mic</button> ",
        if speech_supported { "" } else { " disabled" }
    );
    out.push_str("<button id=\"send\" type=\"button\" onclick=\"submitText()\">Send</button></div>");
    out.push_str(
        "<div class=\"panel\"><h3>Generate a new profile</h3>\
         <button type=\"button\" onclick=\"generateProfile()\">Generate random schedule</button></div>",
    );
    preference_panels(&mut out, &snapshot.preferences);
    out.push_str("</aside><main>");
    calendar(&mut out, &snapshot.events);
    out.push_str("</main></div>");
    edit_dialog(&mut out);
    out.push_str("</body></html>");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(events: Vec<CalendarEvent>) -> PlannerSnapshot {
        PlannerSnapshot {
            events,
            preferences: Preferences::default(),
            profile: Some("Profile: Ana Silva (Teacher)".to_string()),
        }
    }

    #[test]
    fn empty_week_shows_placeholder() {
        let html = render_page(&snapshot(vec![]), false);
        assert!(html.contains("Your calendar is empty"));
        assert!(html.contains("Profile: Ana Silva (Teacher)"));
    }

    #[test]
    fn event_titles_are_escaped() {
        let event = CalendarEvent {
            id: "x'1".to_string(),
            day: 2,
            start_hour: 9.0,
            end_hour: 10.0,
            title: "<script>alert(1)</script>".to_string(),
            color: "bg-pink-500".to_string(),
        };
        let html = render_page(&snapshot(vec![event]), false);
        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
        assert!(html.contains("9:00 AM - 10:00 AM"));
    }

    #[test]
    fn dialog_lists_days_and_hours() {
        let html = render_page(&snapshot(vec![]), false);
        assert_eq!(html.matches("<option value=").count(), 7 + 17);
        assert!(html.contains("<option value=\"23\">23:00</option>"));
    }

    #[test]
    fn current_preferences_are_checked() {
        let html = render_page(&snapshot(vec![]), false);
        assert!(html.contains("value=\"evening\" checked"));
        assert!(html.contains("value=\"early\" checked"));
        assert!(html.contains("value=\"after_work\" checked"));
        assert!(!html.contains("value=\"morning\" checked"));
    }
}
