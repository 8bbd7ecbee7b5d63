//! JSON API over the registry.
//!
//! Every handler locks the shared [`server::AppState`] registry, calls one
//! registry action, and returns the result as JSON. Failures use
//! [`server::ErrorResponse`] with a 400, 404, 409 or 500 status.
//!
//! ## Starting the Server
//!
//! ```text
//! # Start on default port 8080
//! organ-match serve
//!
//! # Custom port and data directory
//! organ-match --data-dir /var/lib/organ-match serve --port 3000
//! ```
//!
//! ## API Endpoints
//!
//! | Method   | Path                                 | Action                      |
//! |----------|--------------------------------------|-----------------------------|
//! | `GET`    | `/api/donors`                        | List donors (`?organ=`)     |
//! | `POST`   | `/api/donors`                        | Pledge organs               |
//! | `DELETE` | `/api/donors/{id}/organs/{organ}`    | Withdraw one organ          |
//! | `GET`    | `/api/recipients`                    | List waitlist (`?organ=&urgency=&status=`) |
//! | `POST`   | `/api/recipients`                    | Register a recipient        |
//! | `PATCH`  | `/api/recipients/{id}/urgency`       | Change urgency              |
//! | `DELETE` | `/api/recipients/{id}`               | Remove a recipient          |
//! | `POST`   | `/api/recipients/simulate`           | Add synthetic recipients    |
//! | `GET`    | `/api/recipients/{id}/score`         | Priority breakdown          |
//! | `POST`   | `/api/match`                         | Run matching                |
//! | `POST`   | `/api/interest`                      | Record interest, auto-match |
//! | `GET`    | `/api/notifications`                 | List notifications          |
//! | `DELETE` | `/api/notifications`                 | Clear notifications         |
//! | `GET`    | `/api/hospitals`                     | Hospital directory          |

pub mod server;
