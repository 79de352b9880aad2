use kiri::core::error::KiriError;
use kiri::core::extensions::Kind;
use kiri::core::origin;
use kiri::core::pathset::Location;
use kiri::core::search::Category;
use kiri::core::storage::Storage;
use kiri::core::version::Version;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

fn touch(path: &Path) {
    fs::create_dir_all(path.parent().expect("parent")).expect("create parent");
    fs::write(path, "").expect("write file");
}

fn visits(storage: &Storage, category: Category, location: Location) -> Vec<(PathBuf, Kind)> {
    let mut seen = Vec::new();
    let stopped = storage.iterate(category, location, |path, kind| {
        seen.push((path.to_path_buf(), kind.clone()));
        false
    });
    assert!(!stopped, "collecting visitor never stops the walk");
    seen
}

fn local_includes(storage: &Storage) -> Vec<PathBuf> {
    storage
        .includes()
        .get(Location::Local)
        .map(Path::to_path_buf)
        .collect()
}

#[test]
fn include_then_exclude_scenario_visits_only_unexcluded_files() {
    let tmp = tempdir().expect("tempdir");
    let mut storage = Storage::initialize_at(tmp.path()).expect("initialize");
    let proj = storage.origin().expect("origin").to_path_buf();

    touch(&proj.join("src/a.cpp"));
    touch(&proj.join("src/gen/b.cpp"));
    touch(&proj.join("src/README"));

    assert!(storage.include(&proj.join("src")));
    assert!(!storage.include(&proj.join("src/gen")));
    assert_eq!(local_includes(&storage), vec![proj.join("src")]);

    storage.use_extension(Kind::Source, "cpp");
    assert!(storage.exclude(&proj.join("src/gen")));

    let seen = visits(&storage, Category::Project, Location::Local);
    let classified: Vec<_> = seen.iter().filter(|(_, kind)| *kind != Kind::Any).collect();
    assert_eq!(classified, vec![&(proj.join("src/a.cpp"), Kind::Source)]);
    assert!(seen.iter().all(|(path, _)| !path.starts_with(proj.join("src/gen"))));
    assert!(seen.contains(&(proj.join("src/README"), Kind::Any)));
}

#[test]
fn dominance_is_order_independent() {
    let tmp = tempdir().expect("tempdir");
    fs::create_dir_all(tmp.path().join("a/b")).expect("mkdir");

    let mut first = Storage::initialize_at(tmp.path()).expect("initialize");
    let origin = first.origin().expect("origin").to_path_buf();
    assert!(first.include(&origin.join("a/b")));
    assert!(first.include(&origin.join("a")));

    let mut second = Storage::discover_from(&origin);
    assert!(second.include(&origin.join("a")));
    assert!(!second.include(&origin.join("a/b")));

    assert_eq!(local_includes(&first), vec![origin.join("a")]);
    assert_eq!(local_includes(&first), local_includes(&second));
}

#[test]
fn exclusions_apply_regardless_of_location() {
    let project = tempdir().expect("project");
    let system = tempdir().expect("system");
    touch(&system.path().join("include/vector.hpp"));
    touch(&system.path().join("include/bits/alloc.hpp"));
    touch(&system.path().join("include/detail/impl.hpp"));

    let mut storage = Storage::initialize_at(project.path()).expect("initialize");
    storage.use_extension(Kind::Header, "hpp");
    assert!(storage.include(&system.path().join("include")));
    assert!(storage.exclude(&system.path().join("include/bits")));

    let (_, included) = storage.classify(&system.path().join("include/bits/alloc.hpp"));
    assert!(!included);

    let seen = visits(&storage, Category::Project, Location::Global);
    assert_eq!(
        seen,
        vec![
            (system.path().join("include/detail/impl.hpp"), Kind::Header),
            (system.path().join("include/vector.hpp"), Kind::Header),
        ]
    );
    assert!(visits(&storage, Category::Project, Location::Local).is_empty());
}

#[test]
fn iterate_stops_at_first_positive_visit_across_include_roots() {
    let tmp = tempdir().expect("tempdir");
    let mut storage = Storage::initialize_at(tmp.path()).expect("initialize");
    let origin = storage.origin().expect("origin").to_path_buf();
    touch(&origin.join("one/x.cpp"));
    touch(&origin.join("two/y.cpp"));
    assert!(storage.include(&origin.join("one")));
    assert!(storage.include(&origin.join("two")));

    let mut seen = Vec::new();
    let found = storage.iterate(Category::Project, Location::Local, |path, _| {
        seen.push(path.to_path_buf());
        true
    });
    assert!(found);
    assert_eq!(seen, vec![origin.join("one/x.cpp")]);
}

#[test]
fn index_category_searches_fixed_directories() {
    let tmp = tempdir().expect("tempdir");
    let mut storage = Storage::initialize_at(tmp.path()).expect("initialize");
    storage.use_extension(Kind::from("symbols"), "sym");

    let local = storage.create(Location::Local, "main.sym").expect("local path");
    let global = storage.create(Location::Global, "stdlib.sym").expect("global path");
    touch(&local);
    touch(&global);

    assert_eq!(
        visits(&storage, Category::Index, Location::Local),
        vec![(local, Kind::Other("symbols".to_string()))]
    );
    assert_eq!(
        visits(&storage, Category::Index, Location::Global),
        vec![(global, Kind::Other("symbols".to_string()))]
    );
}

#[test]
fn locate_from_any_descendant_returns_same_origin() {
    let tmp = tempdir().expect("tempdir");
    let storage = Storage::initialize_at(tmp.path()).expect("initialize");
    let origin = storage.origin().expect("origin").to_path_buf();

    for rel in ["", "a", "a/b", "a/b/c", ".kiri/index/local"] {
        let dir = origin.join(rel);
        fs::create_dir_all(&dir).expect("mkdir");
        let found = Storage::discover_from(&dir);
        assert_eq!(found.origin(), Some(origin.as_path()), "from {:?}", rel);
    }
}

#[test]
fn initialize_rejects_existing_marker_states() {
    let tmp = tempdir().expect("tempdir");
    Storage::initialize_at(tmp.path()).expect("initialize");
    assert!(matches!(
        Storage::initialize_at(tmp.path()),
        Err(KiriError::AlreadyInitialized(_))
    ));

    let occupied = tempdir().expect("tempdir");
    fs::write(occupied.path().join(origin::MARKER_DIR), "").expect("write marker file");
    assert!(matches!(
        Storage::initialize_at(occupied.path()),
        Err(KiriError::InvalidState(_))
    ));
}

#[test]
fn project_configuration_round_trip() {
    let tmp = tempdir().expect("tempdir");
    let mut storage = Storage::initialize_at(tmp.path()).expect("initialize");
    let origin = storage.origin().expect("origin").to_path_buf();
    fs::write(
        origin::configuration(&origin),
        "[extensions]\nheader = [\"hh\"]\nsource = [\"cc\"]\n\n[paths]\ninclude = [\".\"]\nexclude = [\".kiri\", \"build\"]\n",
    )
    .expect("write configuration");
    touch(&origin.join("lib/a.cc"));
    touch(&origin.join("lib/a.hh"));
    touch(&origin.join("build/a.o"));

    let applied = storage.load_configuration().expect("load configuration");
    assert!(applied.rejected_includes.is_empty());
    assert!(applied.rejected_excludes.is_empty());

    let seen = visits(&storage, Category::Project, Location::Local);
    assert_eq!(
        seen,
        vec![
            (origin.join("lib/a.cc"), Kind::Source),
            (origin.join("lib/a.hh"), Kind::Header),
        ]
    );
}

#[test]
fn version_file_scenarios() {
    let tmp = tempdir().expect("tempdir");
    let file = tmp.path().join("version");

    fs::write(&file, "1.2.3-beta\n").expect("write");
    let version = Version::load(&file).expect("parse");
    assert_eq!(
        (version.major(), version.minor(), version.patch(), version.stage()),
        ("1", "2", "3", "beta")
    );
    assert_eq!(version.visual(), "1.2.3-beta");

    fs::write(&file, "1.2").expect("write");
    assert!(matches!(Version::load(&file), Err(KiriError::VersionParse(_))));
}
