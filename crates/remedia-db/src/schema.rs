//! SQL schema definitions.

/// Complete schema for the Remedia v1 database.
pub const SCHEMA_V1: &str = r#"
-- ============================================================
-- Tenancy: pharmacies and their staff principals
-- ============================================================

CREATE TABLE IF NOT EXISTS pharmacies (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    tenant_code TEXT NOT NULL UNIQUE,
    name TEXT NOT NULL,
    address TEXT,
    city TEXT,
    postal_code TEXT,
    phone TEXT,
    contact_email TEXT,
    is_active INTEGER NOT NULL DEFAULT 1,
    created_at INTEGER NOT NULL,
    updated_at INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS principals (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    email TEXT NOT NULL UNIQUE,
    password_hash TEXT NOT NULL,
    full_name TEXT,
    is_active INTEGER NOT NULL DEFAULT 1,
    pharmacy_id INTEGER NOT NULL REFERENCES pharmacies(id),
    created_at INTEGER NOT NULL,
    updated_at INTEGER NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_principals_pharmacy ON principals(pharmacy_id);

-- ============================================================
-- Transfer codes
-- ============================================================

CREATE TABLE IF NOT EXISTS transfer_codes (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    code TEXT NOT NULL UNIQUE,
    is_active INTEGER NOT NULL DEFAULT 1,
    expires_at INTEGER NOT NULL,
    max_uses INTEGER NOT NULL DEFAULT 1,
    current_uses INTEGER NOT NULL DEFAULT 0,
    pharmacy_id INTEGER NOT NULL REFERENCES pharmacies(id),
    issued_by INTEGER NOT NULL REFERENCES principals(id),
    created_at INTEGER NOT NULL,
    last_used_at INTEGER
);

CREATE INDEX IF NOT EXISTS idx_codes_pharmacy ON transfer_codes(pharmacy_id);
CREATE INDEX IF NOT EXISTS idx_codes_expires ON transfer_codes(expires_at);

-- ============================================================
-- Documents (content rests as AEAD ciphertext only)
-- ============================================================

CREATE TABLE IF NOT EXISTS documents (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    stored_name TEXT NOT NULL,
    original_name TEXT NOT NULL,
    size_bytes INTEGER NOT NULL,
    extension TEXT NOT NULL,
    mime_type TEXT NOT NULL,
    ciphertext BLOB NOT NULL,
    is_viewed INTEGER NOT NULL DEFAULT 0,
    viewed_at INTEGER,
    delete_after INTEGER NOT NULL,
    uploaded_at INTEGER NOT NULL,
    pharmacy_id INTEGER NOT NULL REFERENCES pharmacies(id),
    code_id INTEGER NOT NULL REFERENCES transfer_codes(id)
);

CREATE INDEX IF NOT EXISTS idx_documents_pharmacy ON documents(pharmacy_id, uploaded_at);
CREATE INDEX IF NOT EXISTS idx_documents_delete_after ON documents(delete_after);
"#;
