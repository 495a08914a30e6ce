use eyre::Result;
use sqlx::{Pool, Postgres};
use tracing::info;

pub async fn initialize_database(pool: &Pool<Postgres>) -> Result<()> {
    info!("Initializing database schema...");

    // Create sections table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS sections (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            name VARCHAR(255) NOT NULL,
            grade VARCHAR(64) NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create teachers table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS teachers (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            name VARCHAR(255) NOT NULL,
            email VARCHAR(255) NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create courses table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS courses (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            code VARCHAR(64) NOT NULL UNIQUE,
            name VARCHAR(255) NOT NULL,
            description TEXT NULL,
            credits INTEGER NOT NULL DEFAULT 0,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT non_negative_credits CHECK (credits >= 0)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create schedule_configs table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS schedule_configs (
            section_id UUID PRIMARY KEY REFERENCES sections(id) ON DELETE CASCADE,
            working_days SMALLINT[] NOT NULL,
            start_time TIME NOT NULL,
            end_time TIME NOT NULL,
            class_duration INTEGER NOT NULL,
            break_slots JSONB NOT NULL DEFAULT '[]'::jsonb,
            updated_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT valid_day_window CHECK (end_time > start_time),
            CONSTRAINT positive_duration CHECK (class_duration > 0)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create schedules table; one occupant per cell, checked at commit so
    // a batch can swap two cells
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS schedules (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            section_id UUID NOT NULL REFERENCES sections(id) ON DELETE CASCADE,
            day_of_week SMALLINT NOT NULL,
            start_time TIME NOT NULL,
            end_time TIME NOT NULL,
            course_id UUID NULL REFERENCES courses(id) ON DELETE SET NULL,
            teacher_id UUID NULL REFERENCES teachers(id) ON DELETE SET NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT valid_time_range CHECK (end_time > start_time),
            CONSTRAINT valid_day_of_week CHECK (day_of_week BETWEEN 1 AND 7),
            CONSTRAINT schedules_cell_unique UNIQUE (section_id, day_of_week, start_time)
                DEFERRABLE INITIALLY DEFERRED
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create attendance_statuses table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS attendance_statuses (
            code VARCHAR(32) PRIMARY KEY,
            name VARCHAR(255) NOT NULL,
            color VARCHAR(32) NULL,
            icon VARCHAR(64) NULL,
            is_negative BOOLEAN NOT NULL DEFAULT FALSE,
            is_excused BOOLEAN NOT NULL DEFAULT FALSE,
            sort_order INTEGER NOT NULL DEFAULT 0
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create attendance_records table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS attendance_records (
            student_id UUID NOT NULL,
            section_id UUID NOT NULL REFERENCES sections(id) ON DELETE CASCADE,
            date DATE NOT NULL,
            status_code VARCHAR(32) NOT NULL REFERENCES attendance_statuses(code),
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            PRIMARY KEY (student_id, section_id, date)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create indexes
    for statement in [
        "CREATE INDEX IF NOT EXISTS idx_schedules_section_id ON schedules(section_id)",
        "CREATE INDEX IF NOT EXISTS idx_schedules_teacher_id ON schedules(teacher_id)",
        "CREATE INDEX IF NOT EXISTS idx_courses_name ON courses(name)",
        "CREATE INDEX IF NOT EXISTS idx_attendance_records_section_date ON attendance_records(section_id, date)",
    ] {
        sqlx::query(statement).execute(pool).await?;
    }

    info!("Database schema initialized successfully.");
    Ok(())
}
