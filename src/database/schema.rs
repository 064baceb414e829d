//! Arachne table names and a rehearsal schema
//!
//! Only the tables and columns written by the ARS3D import are described here.
//! The DDL is used for local DuckDB rehearsal databases; the production Arachne
//! schema is owned elsewhere.

/// Target table names
pub mod tables {
    pub const OBJECT: &str = "objekt";
    pub const PLACE_REFERENCE: &str = "ortsbezug";
    pub const DATING: &str = "datierung";
    pub const CERAMIC: &str = "objektkeramik";
    pub const URI: &str = "URI";
    pub const MODEL_3D: &str = "modell3d";
}

/// Column names that link or mark imported records
pub mod columns {
    /// Parent reference used by most dependent tables
    pub const OBJECT_FK: &str = "FS_ObjektID";
    /// `objektkeramik` shares the object's primary key
    pub const CERAMIC_PK: &str = "PS_ObjektkeramikID";
    /// Import marker on `objekt`
    pub const OBJECT_MARKER: &str = "Arbeitsnotiz";
    /// Import marker on `ortsbezug` and `datierung`
    pub const ORIGIN_MARKER: &str = "Ursprungsinformationen";
    /// Published model folder on `modell3d`
    pub const MODEL_PATH: &str = "Pfad";
}

/// Rehearsal schema helper
pub struct ArachneSchema;

impl ArachneSchema {
    /// DDL for the imported subset of Arachne (DuckDB dialect)
    ///
    /// Generated keys come from sequences so that `RETURNING` yields them.
    pub fn create_tables_sql() -> &'static str {
        r#"
CREATE SEQUENCE IF NOT EXISTS seq_objekt START 1;
CREATE SEQUENCE IF NOT EXISTS seq_ortsbezug START 1;
CREATE SEQUENCE IF NOT EXISTS seq_datierung START 1;
CREATE SEQUENCE IF NOT EXISTS seq_uri START 1;
CREATE SEQUENCE IF NOT EXISTS seq_modell3d START 1;

CREATE TABLE IF NOT EXISTS objekt (
    PS_ObjektID BIGINT PRIMARY KEY DEFAULT nextval('seq_objekt'),
    KurzbeschreibungObjekt TEXT,
    Katalognummer TEXT,
    Material TEXT,
    Erhaltung TEXT,
    Bearbeitungen TEXT,
    GattungAllgemein TEXT,
    Technik TEXT,
    Arbeitsnotiz TEXT,
    BearbeiterObjekt TEXT
);

CREATE TABLE IF NOT EXISTS ortsbezug (
    PS_OrtsbezugID BIGINT PRIMARY KEY DEFAULT nextval('seq_ortsbezug'),
    FS_OrtID BIGINT,
    FS_ObjektID BIGINT,
    ArtOrtsangabe TEXT,
    Ursprungsinformationen TEXT
);

CREATE TABLE IF NOT EXISTS datierung (
    PS_DatierungID BIGINT PRIMARY KEY DEFAULT nextval('seq_datierung'),
    FS_ObjektID BIGINT,
    AnfDatZeitraum TEXT,
    AnfDatJh TEXT,
    AnfDatvn TEXT,
    AnfPraezise TEXT,
    EndDatZeitraum TEXT,
    EndDatJh TEXT,
    EndDatvn TEXT,
    EndPraezise TEXT,
    AnfEpoche TEXT,
    AnfEpocheChronId TEXT,
    Ursprungsinformationen TEXT
);

CREATE TABLE IF NOT EXISTS objektkeramik (
    PS_ObjektkeramikID BIGINT PRIMARY KEY,
    GefaessformenKeramik TEXT
);

CREATE TABLE IF NOT EXISTS "URI" (
    PS_URIID BIGINT PRIMARY KEY DEFAULT nextval('seq_uri'),
    FS_ObjektID BIGINT,
    URI TEXT,
    FS_URIQuelleID BIGINT,
    Beziehung TEXT
);

CREATE TABLE IF NOT EXISTS modell3d (
    PS_Modell3dID BIGINT PRIMARY KEY DEFAULT nextval('seq_modell3d'),
    FS_ObjektID BIGINT,
    Titel TEXT,
    Modellierer TEXT,
    TechnischeHinweise TEXT,
    Lizenz TEXT,
    ModellTyp TEXT,
    Dateiname TEXT,
    Dateiformat TEXT,
    DateinameMTL TEXT,
    Pfad TEXT
);
"#
    }
}
