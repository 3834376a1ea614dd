use portfolio_core::db::open_db_in_memory;
use portfolio_core::{
    PageError, PageService, ProjectRepository, RepoError, SqliteProjectRepository,
    SqliteResumeRepository, SqliteSkillRepository,
};
use rusqlite::{params, Connection};

struct ProjectRow<'a> {
    slug: &'a str,
    display_order: i64,
    featured: bool,
    active: bool,
    created_at: i64,
}

fn insert_project(conn: &Connection, row: ProjectRow<'_>) {
    conn.execute(
        "INSERT INTO projects (
            title, slug, short_description, technologies,
            display_order, is_featured, is_active, created_at
        ) VALUES (?1, ?2, ?3, 'Rust, SQLite', ?4, ?5, ?6, ?7);",
        params![
            format!("Title {}", row.slug),
            row.slug,
            format!("Summary of {}", row.slug),
            row.display_order,
            i64::from(row.featured),
            i64::from(row.active),
            row.created_at,
        ],
    )
    .unwrap();
}

fn insert_skill(conn: &Connection, name: &str, category: &str, display_order: i64, active: bool) {
    conn.execute(
        "INSERT INTO skills (name, category, proficiency, display_order, is_active)
         VALUES (?1, ?2, 80, ?3, ?4);",
        params![name, category, display_order, i64::from(active)],
    )
    .unwrap();
}

fn insert_resume(conn: &Connection, title: &str, is_default: bool) {
    conn.execute(
        "INSERT INTO resumes (title, file_url, is_default) VALUES (?1, ?2, ?3);",
        params![title, format!("/media/{title}.pdf"), i64::from(is_default)],
    )
    .unwrap();
}

fn service(
    conn: &Connection,
) -> PageService<SqliteProjectRepository<'_>, SqliteSkillRepository<'_>, SqliteResumeRepository<'_>>
{
    PageService::new(
        SqliteProjectRepository::new(conn),
        SqliteSkillRepository::new(conn),
        SqliteResumeRepository::new(conn),
    )
}

#[test]
fn home_features_at_most_three_active_featured_projects_in_display_order() {
    let conn = open_db_in_memory().unwrap();
    for (slug, order, featured, active) in [
        ("fifth", 5, true, true),
        ("first", 1, true, true),
        ("hidden", 0, true, false),
        ("plain", 0, false, true),
        ("third", 3, true, true),
        ("second", 2, true, true),
    ] {
        insert_project(
            &conn,
            ProjectRow {
                slug,
                display_order: order,
                featured,
                active,
                created_at: 1_000,
            },
        );
    }

    let home = service(&conn).home().unwrap();
    let slugs: Vec<&str> = home
        .featured_projects
        .iter()
        .map(|p| p.slug.as_str())
        .collect();
    assert_eq!(slugs, vec!["first", "second", "third"]);
    assert!(home
        .featured_projects
        .iter()
        .all(|p| p.is_featured && p.is_active));
    assert_eq!(home.meta.meta_title, "Professional Portfolio");
}

#[test]
fn home_with_no_featured_projects_is_empty_not_error() {
    let conn = open_db_in_memory().unwrap();
    let home = service(&conn).home().unwrap();
    assert!(home.featured_projects.is_empty());
    assert!(home.skills.is_empty());
}

#[test]
fn skills_are_active_only_and_ordered_by_category_then_display_order() {
    let conn = open_db_in_memory().unwrap();
    insert_skill(&conn, "React", "Frontend", 2, true);
    insert_skill(&conn, "Rust", "Backend", 2, true);
    insert_skill(&conn, "Cobol", "Backend", 0, false);
    insert_skill(&conn, "SQL", "Backend", 1, true);
    insert_skill(&conn, "CSS", "Frontend", 1, true);

    let home = service(&conn).home().unwrap();
    let names: Vec<&str> = home.skills.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["SQL", "Rust", "CSS", "React"]);
    assert!(home.skills.iter().all(|s| s.is_active));
    assert!(home.skills.windows(2).all(|pair| {
        (pair[0].category.as_str(), pair[0].display_order)
            <= (pair[1].category.as_str(), pair[1].display_order)
    }));

    let categories: Vec<&str> = home
        .skill_groups
        .iter()
        .map(|g| g.category.as_str())
        .collect();
    assert_eq!(categories, vec!["Backend", "Frontend"]);
}

#[test]
fn project_list_breaks_display_order_ties_newest_first() {
    let conn = open_db_in_memory().unwrap();
    for (slug, order, active, created_at) in [
        ("old", 1, true, 1_000),
        ("new", 1, true, 5_000),
        ("later-order", 2, true, 9_000),
        ("earlier-order", 0, true, 100),
        ("inactive", 0, false, 10_000),
    ] {
        insert_project(
            &conn,
            ProjectRow {
                slug,
                display_order: order,
                featured: false,
                active,
                created_at,
            },
        );
    }

    let list = service(&conn).project_list().unwrap();
    let slugs: Vec<&str> = list.projects.iter().map(|p| p.slug.as_str()).collect();
    assert_eq!(slugs, vec!["earlier-order", "new", "old", "later-order"]);
    assert_eq!(list.meta.meta_title, "My Projects");
}

#[test]
fn project_detail_uses_project_metadata() {
    let conn = open_db_in_memory().unwrap();
    insert_project(
        &conn,
        ProjectRow {
            slug: "compiler",
            display_order: 0,
            featured: false,
            active: true,
            created_at: 1,
        },
    );

    let detail = service(&conn).project_detail("compiler").unwrap();
    assert_eq!(detail.meta.meta_title, "Project: Title compiler");
    assert_eq!(detail.meta.meta_description, "Summary of compiler");
    assert_eq!(detail.project.technology_list(), vec!["Rust", "SQLite"]);
}

#[test]
fn unknown_slug_is_not_found_never_a_fallback() {
    let conn = open_db_in_memory().unwrap();
    insert_project(
        &conn,
        ProjectRow {
            slug: "exists",
            display_order: 0,
            featured: true,
            active: true,
            created_at: 1,
        },
    );

    let err = service(&conn).project_detail("missing").unwrap_err();
    match err {
        PageError::ProjectNotFound(slug) => assert_eq!(slug, "missing"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn resume_without_default_is_explicitly_absent() {
    let conn = open_db_in_memory().unwrap();
    insert_resume(&conn, "draft", false);

    let resume = service(&conn).resume().unwrap();
    assert!(resume.resume.is_none());
    assert_eq!(resume.meta.meta_title, "My Resume");
}

#[test]
fn resume_takes_first_default_when_several_are_flagged() {
    let conn = open_db_in_memory().unwrap();
    insert_resume(&conn, "draft", false);
    insert_resume(&conn, "current", true);
    insert_resume(&conn, "duplicate", true);

    let resume = service(&conn).resume().unwrap().resume.unwrap();
    assert_eq!(resume.title, "current");
    assert!(resume.is_default);
}

#[test]
fn about_page_has_static_metadata() {
    let conn = open_db_in_memory().unwrap();
    let about = service(&conn).about();
    assert_eq!(about.meta.meta_title, "About Me");
    assert_eq!(
        about.meta.meta_description,
        "Learn more about my professional background and skills."
    );
}

#[test]
fn invalid_stored_flag_is_reported_not_masked() {
    let conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO projects (title, slug, is_active) VALUES ('Broken', 'broken', 7);",
        [],
    )
    .unwrap();

    let err = SqliteProjectRepository::new(&conn)
        .get_by_slug("broken")
        .unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(_)));
}
