use super::*;

fn native(s: &str) -> String {
    s.replace('/', std::path::MAIN_SEPARATOR_STR)
}

#[test]
fn add_trailing_separator_appends_once() {
    let cases: &[(&str, &str)] = &[
        ("dir", "dir/"),
        ("dir/", "dir/"),
        ("dir\\sub", "dir/sub/"),
        ("/", "/"),
    ];

    for (input, expected) in cases {
        let got = add_trailing_separator(input).expect("non-empty input");
        assert_eq!(got, native(expected), "input: {:?}", input);
    }

    assert!(matches!(add_trailing_separator(""), Err(PathError::Empty)));
}

#[test]
fn strip_trailing_separator_keeps_roots() {
    let cases: &[(&str, &str)] = &[
        ("dir/", "dir"),
        ("dir//", "dir"),
        ("dir", "dir"),
        ("/", "/"),
        ("//", "/"),
        ("C:/", "C:/"),
        ("C:/dir/", "C:/dir"),
        ("", ""),
    ];

    for (input, expected) in cases {
        assert_eq!(strip_trailing_separator(input), *expected, "input: {:?}", input);
    }
}

#[test]
fn last_path_element_returns_final_component() {
    let cases: &[(&str, &str)] = &[
        ("../dir1/dir2/fileName.ext", "fileName.ext"),
        ("../dir1/dir2/", ""),
        ("fileName.ext", "fileName.ext"),
        ("..\\dir1\\dir2\\dir3", "dir3"),
    ];

    for (input, expected) in cases {
        let got = last_path_element(input).expect("non-empty input");
        assert_eq!(got, *expected, "input: {:?}", input);
    }

    assert!(last_path_element("").is_err());
}

#[test]
fn split_path_and_file_name_cases() {
    let cases: &[(&str, &str, &str)] = &[
        ("a/b/c.txt", "a/b", "c.txt"),
        ("  a/b/c.txt  ", "a/b", "c.txt"),
        ("a/b/", "a/b", ""),
        ("c.txt", "", "c.txt"),
        ("/c.txt", "/", "c.txt"),
        ("C:\\c.txt", "C:/", "c.txt"),
    ];

    for (input, dir, name) in cases {
        let (got_dir, got_name) = split_path_and_file_name(input).expect("valid input");
        assert_eq!(got_dir, native(dir), "dir for {:?}", input);
        assert_eq!(got_name, *name, "name for {:?}", input);
    }

    assert!(matches!(split_path_and_file_name("   "), Err(PathError::Empty)));
}

#[test]
fn split_name_and_ext_cases() {
    let cases: &[(&str, (&str, &str))] = &[
        ("report.txt", ("report", ".txt")),
        ("archive.tar.gz", ("archive.tar", ".gz")),
        (".bashrc", (".bashrc", "")),
        ("trailing.", ("trailing.", "")),
        ("noext", ("noext", "")),
        ("", ("", "")),
    ];

    for (input, expected) in cases {
        assert_eq!(split_name_and_ext(input), *expected, "input: {:?}", input);
    }
}

#[test]
fn lexical_clean_removes_dot_components() {
    let cases: &[(&str, &str)] = &[
        ("a/./b", "a/b"),
        ("a/b/../c", "a/c"),
        ("../a", "../a"),
        ("a/..", "."),
        ("/..", "/"),
        ("/a/../../b", "/b"),
    ];

    for (input, expected) in cases {
        let got = lexical_clean(Path::new(input));
        assert_eq!(got, PathBuf::from(expected), "input: {:?}", input);
    }
}

#[cfg(unix)]
#[test]
fn make_absolute_resolves_against_cwd() {
    let cwd = std::env::current_dir().expect("cwd");

    let got = make_absolute("some/./dir/../file.txt").expect("absolute");
    assert_eq!(got, cwd.join("some/file.txt"));

    let rooted = make_absolute("/tmp/x/../y").expect("absolute");
    assert_eq!(rooted, PathBuf::from("/tmp/y"));

    assert!(matches!(make_absolute("  "), Err(PathError::Empty)));
}

#[cfg(unix)]
#[test]
fn join_paths_normalizes_separators() {
    assert_eq!(join_paths("a\\b", "/c/d.txt"), PathBuf::from("a/b/c/d.txt"));
    assert_eq!(join_paths("a/b", "../c"), PathBuf::from("a/c"));
}
