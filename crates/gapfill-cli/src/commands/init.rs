//! The `gapfill init` command.

use std::path::Path;

use anyhow::Result;

const FILES: &[(&str, &str)] = &[
    ("gapfill.toml", SAMPLE_CONFIG),
    ("data/sections.json", SAMPLE_INDEX),
    ("data/articles.json", SAMPLE_SECTION),
];

pub fn execute() -> Result<()> {
    for (path, content) in FILES {
        let path = Path::new(path);
        if path.exists() {
            println!("{} already exists, skipping.", path.display());
            continue;
        }
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        println!("Created {}", path.display());
    }

    println!("\nNext steps:");
    println!("  1. Run: gapfill validate");
    println!("  2. Run: gapfill sections");
    println!("  3. Run: gapfill play --route \"#/section/articles\"");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# gapfill configuration

# Directory or http(s):// base URL the catalog is served from
catalog_root = "."
sections_path = "data/sections.json"

# course_title = "Grammaire progressive du Français"
# language = "uk"
http_timeout_secs = 30
"#;

const SAMPLE_INDEX: &str = r#"{
  "courseTitle": "Grammaire progressive du Français",
  "sections": [
    { "id": "articles", "title": "Les articles", "file": "data/articles.json" }
  ]
}
"#;

const SAMPLE_SECTION: &str = r#"{
  "id": "articles",
  "title": "Les articles",
  "questions": [
    { "id": 1, "text": "___ chat dort sur le canapé.", "answer": "Le", "hint": "masculin singulier" },
    { "id": 2, "text": "J'aime beaucoup ___ musique.", "answer_b64": "bGE=" },
    { "id": 3, "text": "Le matin, il boit ___ café.", "answer": "du", "hint": "article partitif" },
    { "id": 4, "text": "Les enfants vont à ___ école.", "answer_b64": "bCc=" },
    { "id": 5, "text": "Elle est ___ au marché. (aller)", "answer": "allée" }
  ]
}
"#;
