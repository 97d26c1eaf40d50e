/// Part name utilities for package members.
///
/// Parts are addressed by their ZIP member name, e.g. `ppt/slides/slide1.xml`, with no
/// leading slash. Relationship targets use POSIX-style relative references regardless of
/// the host platform, so every helper here works on `/`-separated strings only.

/// Strip a leading slash so that `/ppt/presentation.xml` and `ppt/presentation.xml`
/// address the same member.
#[inline]
pub fn member_name(path: &str) -> &str {
    path.trim_start_matches('/')
}

/// Directory portion of a part name.
///
/// For example, `ppt/slides` for `ppt/slides/slide1.xml`, and the empty string for a
/// part at the package root.
pub fn base_dir(part_path: &str) -> &str {
    let path = member_name(part_path);
    match path.rfind('/') {
        Some(pos) => &path[..pos],
        None => "",
    }
}

/// Filename portion of a part name (`slide1.xml` for `ppt/slides/slide1.xml`).
pub fn file_name(part_path: &str) -> &str {
    let path = member_name(part_path);
    match path.rfind('/') {
        Some(pos) => &path[pos + 1..],
        None => path,
    }
}

/// Extension of a part name without the leading period, lowercased.
pub fn extension(part_path: &str) -> String {
    let name = file_name(part_path);
    match name.rfind('.') {
        Some(pos) => name[pos + 1..].to_ascii_lowercase(),
        None => String::new(),
    }
}

/// Partname index for tuple partnames, or `None` for singleton partnames.
///
/// For example, returns 21 for `ppt/slides/slide21.xml` and `None` for
/// `ppt/presentation.xml`.
pub fn part_index(part_path: &str) -> Option<u32> {
    let name = file_name(part_path);
    let stem = match name.rfind('.') {
        Some(pos) => &name[..pos],
        None => name,
    };

    let digits = stem.bytes().rev().take_while(u8::is_ascii_digit).count();
    if digits == 0 || digits == stem.len() {
        return None;
    }
    let index: Option<u32> = atoi_simd::parse::<_, false, false>(&stem.as_bytes()[stem.len() - digits..]).ok();
    index
}

/// Path of the companion relationships part for a part.
///
/// For example, `ppt/slides/_rels/slide1.xml.rels` for `ppt/slides/slide1.xml`; the
/// package itself (empty path) maps to `_rels/.rels`.
pub fn rels_path_for(part_path: &str) -> String {
    let dir = base_dir(part_path);
    let name = file_name(part_path);
    if dir.is_empty() {
        format!("_rels/{}.rels", name)
    } else {
        format!("{}/_rels/{}.rels", dir, name)
    }
}

/// Resolve a relationship target against the part that owns the relationship.
///
/// A target that does not start with `..` is joined to the owning part's directory.
/// Otherwise each `..` segment pops one directory level from that base and every
/// remaining segment other than `.` is appended. Absolute targets (`/ppt/...`) are taken
/// relative to the package root. The result never escapes the package root.
///
/// ```
/// use pptx_resolve::ooxml::opc::packuri::resolve_path;
///
/// assert_eq!(resolve_path("ppt/slides/slide1.xml", "../media/image1.png"), "ppt/media/image1.png");
/// assert_eq!(resolve_path("ppt/presentation.xml", "slides/slide1.xml"), "ppt/slides/slide1.xml");
/// ```
pub fn resolve_path(base_part_path: &str, target: &str) -> String {
    let mut segments: Vec<&str> = if target.starts_with('/') {
        Vec::new()
    } else {
        base_dir(base_part_path)
            .split('/')
            .filter(|s| !s.is_empty())
            .collect()
    };

    for segment in target.split('/') {
        match segment {
            "" | "." => {},
            ".." => {
                segments.pop();
            },
            _ => segments.push(segment),
        }
    }

    segments.join("/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_base_dir() {
        assert_eq!(base_dir("ppt/slides/slide1.xml"), "ppt/slides");
        assert_eq!(base_dir("/ppt/presentation.xml"), "ppt");
        assert_eq!(base_dir("[Content_Types].xml"), "");
    }

    #[test]
    fn test_file_name_and_extension() {
        assert_eq!(file_name("ppt/slides/slide1.xml"), "slide1.xml");
        assert_eq!(extension("ppt/media/image1.PNG"), "png");
        assert_eq!(extension("ppt/media/noext"), "");
    }

    #[test]
    fn test_part_index() {
        assert_eq!(part_index("ppt/slides/slide21.xml"), Some(21));
        assert_eq!(part_index("ppt/presentation.xml"), None);
        assert_eq!(part_index("ppt/media/123.png"), None);
    }

    #[test]
    fn test_rels_path_for() {
        assert_eq!(
            rels_path_for("ppt/slides/slide1.xml"),
            "ppt/slides/_rels/slide1.xml.rels"
        );
        assert_eq!(rels_path_for(""), "_rels/.rels");
        assert_eq!(
            rels_path_for("ppt/presentation.xml"),
            "ppt/_rels/presentation.xml.rels"
        );
    }

    #[test]
    fn test_resolve_parent_reference() {
        assert_eq!(
            resolve_path("ppt/slides/slide1.xml", "../media/image1.png"),
            "ppt/media/image1.png"
        );
        assert_eq!(
            resolve_path("ppt/slides/slide1.xml", "../../docProps/thumbnail.jpeg"),
            "docProps/thumbnail.jpeg"
        );
    }

    #[test]
    fn test_resolve_sibling_and_absolute() {
        assert_eq!(
            resolve_path("ppt/presentation.xml", "slides/slide3.xml"),
            "ppt/slides/slide3.xml"
        );
        assert_eq!(
            resolve_path("ppt/slides/slide1.xml", "./slide2.xml"),
            "ppt/slides/slide2.xml"
        );
        assert_eq!(
            resolve_path("ppt/slides/slide1.xml", "/ppt/media/image2.png"),
            "ppt/media/image2.png"
        );
        assert_eq!(resolve_path("", "ppt/presentation.xml"), "ppt/presentation.xml");
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn prop_resolved_path_is_normalized(
            base in prop::collection::vec("[a-zA-Z0-9]{1,8}", 0..4),
            target in prop::collection::vec(prop_oneof![
                Just("..".to_string()),
                Just(".".to_string()),
                "[a-zA-Z0-9]{1,8}",
            ], 1..6),
        ) {
            let mut base_path = base.join("/");
            base_path.push_str("/part.xml");
            let resolved = resolve_path(&base_path, &target.join("/"));

            prop_assert!(!resolved.starts_with('/'));
            for segment in resolved.split('/') {
                prop_assert!(segment != "." && segment != "..");
            }
        }
    }
}
