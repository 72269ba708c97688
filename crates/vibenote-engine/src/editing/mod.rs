/*!
 * Editing core: one session owning the document text, its bounded version
 * history, and its attachments, mutated only through commands.
 *
 * ## Command-based editing
 *
 * Hosts express every text mutation as a [`Cmd`](commands::Cmd) and feed it
 * to [`EditingSession::apply`](session::EditingSession::apply), which returns
 * a [`Patch`](patch::Patch) carrying the selection the UI should adopt and
 * the new document version. The splices themselves are pure functions over
 * `(text, selection)`, so they stay trivially testable; the session adds
 * history, attachment bookkeeping, and persistence around them.
 *
 * ## Module structure
 *
 * - [`session`] - the stateful session and its persistence wiring
 * - [`commands`] - `Cmd` and the pure splice functions
 * - [`selection`] / [`patch`] - the offset types crossing the host boundary
 * - [`history`] - the bounded snapshot log
 * - [`search`] - find and replace-all queries
 * - [`attachments`] - the image map and transient blob references
 */

pub mod attachments;
pub mod commands;
pub mod history;
pub mod patch;
pub mod search;
pub mod selection;
pub mod session;
