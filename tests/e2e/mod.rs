// End-to-end tests for the turifo HTTP surface.
//
// Every test starts a stub upstream server that serves the source feeds and
// article pages, then spawns the app on an ephemeral port pointing at it.
// The settings store tests additionally run against a shared PostgreSQL
// testcontainer, one fresh database per test.

mod test_feed;
mod test_health;
