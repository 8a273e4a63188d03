use std::fs;
use std::path::Path;

use crate::error::MapError;
use crate::grid::GridSize;
use crate::section::Section;
use crate::tile::TileRules;

const CSV_MARKER: &str = "\"csv\">";

/// Reads every `"csv">` block of a Tiled export as one section.
///
/// Values are found by digit scanning, so any run of non-digits separates two
/// tiles. Scanning stops at the first block that is missing its marker; a
/// block with fewer than `width * height` values is an error.
pub fn parse_sections(
    text: &str,
    size: GridSize,
    rules: &TileRules,
) -> Result<Vec<Section>, MapError> {
    let expected = size.cell_count();
    let mut sections = Vec::new();
    let mut rest = text;

    while let Some(start) = rest.find(CSV_MARKER) {
        rest = &rest[start + CSV_MARKER.len()..];

        let mut values = Vec::with_capacity(expected);
        for found in 0..expected {
            let Some((value, remaining)) = next_uint(rest) else {
                return Err(MapError::Truncated {
                    section: sections.len(),
                    expected,
                    found,
                });
            };
            values.push(value);
            rest = remaining;
        }

        sections.push(Section::from_raw(size, &values, rules)?);
    }

    if sections.is_empty() {
        return Err(MapError::NoSections);
    }

    Ok(sections)
}

pub fn load_sections(
    path: impl AsRef<Path>,
    size: GridSize,
    rules: &TileRules,
) -> Result<Vec<Section>, MapError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| MapError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let sections = parse_sections(&text, size, rules)?;
    tracing::info!("loaded {} sections from {}", sections.len(), path.display());
    Ok(sections)
}

fn next_uint(text: &str) -> Option<(u32, &str)> {
    let start = text.find(|c: char| c.is_ascii_digit())?;
    let digits = &text[start..];
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());

    let value = digits[..end].bytes().fold(0u32, |acc, digit| {
        acc.saturating_mul(10).saturating_add(u32::from(digit - b'0'))
    });
    Some((value, &digits[end..]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor::ActorKind;
    use crate::grid::Position;

    fn layer(values: &[u32]) -> String {
        let csv: Vec<String> = values.iter().map(u32::to_string).collect();
        format!(
            "<layer name=\"walls\">\n  <data encoding=\"csv\">\n{}\n</data>\n </layer>\n",
            csv.join(",\n")
        )
    }

    #[test]
    fn parses_multiple_sections() {
        let size = GridSize::new(3, 2);
        let text = format!(
            "<?xml version=\"1.0\"?>\n<map>\n{}{}</map>",
            layer(&[1, 8, 2, 8, 8, 16]),
            layer(&[8, 8, 8, 8, 8, 8])
        );

        let sections = parse_sections(&text, size, &TileRules::default()).unwrap();
        assert_eq!(sections.len(), 2);

        let first = &sections[0];
        assert!(first.is_collidable(Position::new(0, 0)));
        assert!(!first.is_collidable(Position::new(1, 0)));
        assert_eq!(
            first.static_spawns().collect::<Vec<_>>(),
            vec![(Position::new(2, 0), ActorKind::Door)]
        );
        assert!(first.is_collidable(Position::new(2, 1)));
        assert!(sections[1].static_spawns().next().is_none());
    }

    #[test]
    fn truncated_section_reports_progress() {
        let size = GridSize::new(3, 2);
        let text = layer(&[8, 8, 8, 8]);

        let err = parse_sections(&text, size, &TileRules::default()).unwrap_err();
        assert!(matches!(
            err,
            MapError::Truncated {
                section: 0,
                expected: 6,
                found: 4
            }
        ));
    }

    #[test]
    fn text_without_markers_has_no_sections() {
        let err = parse_sections("<map></map>", GridSize::new(2, 2), &TileRules::default())
            .unwrap_err();
        assert!(matches!(err, MapError::NoSections));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = load_sections(
            "does/not/exist.tmx",
            GridSize::new(2, 2),
            &TileRules::default(),
        )
        .unwrap_err();
        assert!(matches!(err, MapError::Io { .. }));
    }

    #[test]
    fn shipped_map_loads() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../assets/sections.tmx");
        let size = GridSize::new(40, 16);

        let sections = load_sections(path, size, &TileRules::default()).unwrap();

        assert_eq!(sections.len(), 4);
        for section in &sections {
            assert!(!section.is_collidable(size.center()));
            let doors = section
                .static_spawns()
                .filter(|&(_, kind)| kind == ActorKind::Door)
                .count();
            assert_eq!(doors, 1);
        }
    }

    #[test]
    fn next_uint_skips_separators() {
        let (value, rest) = next_uint(",\n 42,7").unwrap();
        assert_eq!(value, 42);
        assert_eq!(rest, ",7");
        assert!(next_uint("</data>").is_none());
    }
}
