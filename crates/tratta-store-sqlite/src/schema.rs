//! SQL schema for the Tratta SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! the `PRAGMA user_version` number.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS users (
    user_id     TEXT PRIMARY KEY,
    name        TEXT NOT NULL,
    gender      TEXT NOT NULL,   -- 'female' | 'male' | 'unspecified'
    created_at  TEXT NOT NULL    -- ISO 8601 UTC; store-assigned
);

-- Rows are written only after validation and normalization in Rust;
-- the CHECK mirrors the round-trip invariant as a last line of defence.
CREATE TABLE IF NOT EXISTS itineraries (
    itinerary_id    TEXT PRIMARY KEY,
    owner_id        TEXT NOT NULL REFERENCES users(user_id),
    start_address   TEXT NOT NULL,
    end_address     TEXT NOT NULL,
    trip_kind       TEXT NOT NULL,   -- 'one_way' | 'round_trip' | 'daily'
    leave_date      TEXT NOT NULL,   -- ISO 8601 UTC
    return_date     TEXT,            -- present iff trip_kind = 'round_trip'
    fuel_cost       TEXT NOT NULL DEFAULT '0.00',  -- two-decimal string
    tolls           TEXT NOT NULL DEFAULT '0.00',
    description     TEXT NOT NULL DEFAULT '',      -- HTML-escaped on write
    pink            INTEGER NOT NULL DEFAULT 0,
    pets_allowed    INTEGER NOT NULL DEFAULT 0,
    smoking_allowed INTEGER NOT NULL DEFAULT 0,
    created_at      TEXT NOT NULL,
    CHECK ((trip_kind = 'round_trip') = (return_date IS NOT NULL))
);

CREATE INDEX IF NOT EXISTS itineraries_owner_idx ON itineraries(owner_id);
CREATE INDEX IF NOT EXISTS itineraries_leave_idx ON itineraries(leave_date);

PRAGMA user_version = 1;
";
