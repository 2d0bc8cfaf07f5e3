use trie_router::{Binding, CacheCapacity, Router, RouterConfig, RouterError};

fn many(tokens: &[&str]) -> Binding {
    Binding::Many(tokens.iter().map(|s| s.to_string()).collect())
}

#[test]
fn router_common() {
    let mut router: Router<usize> = Router::new();
    router
        .nest("/user/{user_id}", |user| {
            user.insert("post/{post_id}", 1)
                .insert("profile", 2)
                .insert("file/<path>", 3)
                .insert("/", 4);
        })
        .insert("explore", 5)
        .insert("/pan/<path>", 6);

    let cases: &[(&str, usize, &[(&str, Binding)])] = &[
        (
            "/user/asd/post/123",
            1,
            &[
                ("user_id", Binding::One("asd".into())),
                ("post_id", Binding::One("123".into())),
            ],
        ),
        ("/user/asd/profile", 2, &[("user_id", Binding::One("asd".into()))]),
        (
            "/user/asd/file/home/asd/.bashrc",
            3,
            &[
                ("user_id", Binding::One("asd".into())),
                ("path", Binding::Many(vec!["home".into(), "asd".into(), ".bashrc".into()])),
            ],
        ),
        ("/user/asd", 4, &[("user_id", Binding::One("asd".into()))]),
        ("/explore", 5, &[]),
        ("/pan/home/asd", 6, &[("path", Binding::Many(vec!["home".into(), "asd".into()]))]),
    ];

    for (url, data, captures) in cases {
        let ret = router.find(url).unwrap();
        assert_eq!(ret.resource(), data, "{}", url);
        let got: Vec<(&str, &Binding)> = ret.bindings().iter().map(|(k, v)| (&**k, v)).collect();
        let expected: Vec<(&str, &Binding)> = captures.iter().map(|(k, v)| (*k, v)).collect();
        assert_eq!(got, expected, "{}", url);
    }
}

#[test]
fn literal_precedence() {
    let mut router: Router<&str> = Router::new();
    router
        .insert("/a/b", "literal")
        .insert("/a/{x}", "named")
        .insert("/a/<x>", "greedy");

    assert_eq!(*router.find("/a/b").unwrap().resource(), "literal");

    let m = router.find("/a/c").unwrap();
    assert_eq!(*m.resource(), "named");
    assert_eq!(m.bindings().get_one("x"), Some("c"));

    let m = router.find("/a/c/d").unwrap();
    assert_eq!(*m.resource(), "greedy");
    assert_eq!(m.bindings().get("x"), Some(&many(&["c", "d"])));
}

#[test]
fn registration_order_breaks_ties() {
    let mut router: Router<usize> = Router::new();
    router.insert("/{x}/b", 1).insert("/{y}/b", 2);

    let m = router.find("/z/b").unwrap();
    assert_eq!(*m.resource(), 2);
    assert_eq!(m.bindings().get_one("y"), Some("z"));

    // greedy depth does not count, so the later pattern wins
    let mut router: Router<usize> = Router::new();
    router.insert("/<a>/x", 1).insert("/p/<b>", 2);
    assert_eq!(*router.find("/p/x").unwrap().resource(), 2);

    let mut router: Router<usize> = Router::new();
    router.insert("/p/<b>", 2).insert("/<a>/x", 1);
    assert_eq!(*router.find("/p/x").unwrap().resource(), 1);
}

#[test]
fn more_named_beats_fewer() {
    let mut router: Router<usize> = Router::new();
    router.insert("/{a}/{b}", 1).insert("/<rest>", 2);
    assert_eq!(*router.find("/x/y").unwrap().resource(), 1);
    assert_eq!(*router.find("/x/y/z").unwrap().resource(), 2);
}

#[test]
fn trailing_slash_discrimination() {
    let mut router: Router<usize> = Router::new();
    router.insert("/a", 1).insert("/b/", 2).insert("/c/<rest>", 3);

    assert_eq!(*router.find("/a").unwrap().resource(), 1);
    assert!(router.find("/a/").is_none());

    assert_eq!(*router.find("/b/").unwrap().resource(), 2);
    assert!(router.find("/b").is_none());

    assert_eq!(*router.find("/c/x").unwrap().resource(), 3);
    assert_eq!(*router.find("/c/x/").unwrap().resource(), 3);

    router.insert("/a/", 4);
    assert_eq!(*router.find("/a").unwrap().resource(), 1);
    assert_eq!(*router.find("/a/").unwrap().resource(), 4);
}

#[test]
fn remove_then_no_match() {
    let mut router: Router<usize> = Router::new();
    router.insert("/u/{id}", 1);
    assert!(router.find("/u/7").is_some());

    assert_eq!(router.remove("/u/{id}").unwrap(), 1);
    assert!(router.find("/u/7").is_none());
    assert!(router.is_empty());

    assert!(matches!(
        router.remove("/u/{id}"),
        Err(RouterError::RouteNotFound { .. })
    ));
}

#[test]
fn cache_transparency() {
    let patterns = ["/", "/a/b", "/a/{x}", "/a/<x>", "/{p}/b/", "/s/<rest>/end"];
    let paths = [
        "/", "/a/b", "/a/c", "/a/c/d", "/q/b/", "/q/b", "/s/1/2/end", "/s/end", "/nope/x/y",
    ];

    let build = |capacity| {
        let mut router: Router<usize> =
            Router::with_config(RouterConfig::new().with_cache_capacity(capacity));
        for (i, p) in patterns.iter().enumerate() {
            router.insert(p, i);
        }
        router
    };

    let cached = build(CacheCapacity::Unbounded);
    let uncached = build(CacheCapacity::Disabled);

    for _ in 0..2 {
        for path in &paths {
            let lhs = cached.find(path);
            let rhs = uncached.find(path);
            match (lhs, rhs) {
                (Some(l), Some(r)) => {
                    assert_eq!(l.pattern(), r.pattern(), "{}", path);
                    assert_eq!(l.bindings(), r.bindings(), "{}", path);
                }
                (None, None) => {}
                (l, r) => panic!("{}: {:?} != {:?}", path, l.is_some(), r.is_some()),
            }
        }
    }
    let stats = cached.cache_stats();
    assert_eq!(stats.misses, paths.len() as u64);
    assert_eq!(stats.hits, paths.len() as u64);
}

#[test]
fn mutation_invalidates_cache() {
    let mut router: Router<usize> = Router::new();
    router.insert("/a/{x}", 1);
    assert_eq!(*router.find("/a/b").unwrap().resource(), 1);
    assert!(router.is_cached("/a/b"));

    router.insert("/a/b", 2);
    assert!(!router.is_cached("/a/b"));
    assert_eq!(*router.find("/a/b").unwrap().resource(), 2);

    router.remove("/a/b").unwrap();
    assert_eq!(*router.find("/a/b").unwrap().resource(), 1);

    assert!(router.find("/zzz").is_none());
    assert!(router.is_cached("/zzz"));
    router.insert("/zzz", 3);
    assert_eq!(*router.find("/zzz").unwrap().resource(), 3);
}

#[test]
fn cache_survives_node_reuse() {
    let mut router: Router<usize> = Router::new();
    router.insert("/a/{x}", 1).insert("/keep", 0);
    assert_eq!(*router.find("/a/b").unwrap().resource(), 1);

    // the freed branch is recycled for the next insertion
    router.remove("/a/{x}").unwrap();
    router.insert("/c/d", 2);

    assert!(router.find("/a/b").is_none());
    assert_eq!(*router.find("/c/d").unwrap().resource(), 2);
    assert_eq!(*router.find("/keep").unwrap().resource(), 0);
    assert_eq!(router.len(), 2);
}

#[test]
fn mount_concatenation() {
    let mut api: Router<usize> = Router::new();
    api.insert("/{x}", 1);

    let mut router: Router<usize> = Router::new();
    router.mount("/api", api);

    let m = router.find("/api/42").unwrap();
    assert_eq!(*m.resource(), 1);
    assert_eq!(m.bindings().get_one("x"), Some("42"));
    assert_eq!(m.pattern().to_string(), "/api/{x}");
}

#[test]
fn mount_on_root() {
    let mut sub: Router<usize> = Router::new();
    sub.insert("/", 1).insert("/about", 2);

    let mut router: Router<usize> = Router::new();
    router.mount("/", sub);
    assert_eq!(*router.find("/").unwrap().resource(), 1);
    assert_eq!(*router.find("/about").unwrap().resource(), 2);
}

#[test]
fn lru_bound() {
    let config = RouterConfig::new().with_cache_capacity(CacheCapacity::Bounded(2));
    let mut router: Router<usize> = Router::with_config(config);
    router.insert("/{x}", 1);

    router.find("/a");
    router.find("/b");
    router.find("/c");

    assert!(!router.is_cached("/a"));
    assert!(router.is_cached("/b"));
    assert!(router.is_cached("/c"));

    let misses = router.cache_stats().misses;
    assert_eq!(*router.find("/a").unwrap().resource(), 1);
    assert_eq!(router.cache_stats().misses, misses + 1);
    assert!(!router.is_cached("/b"));
}

#[test]
fn duplicate_alias_rejected() {
    let mut router: Router<usize> = Router::new();
    let err = router.try_insert("/{x}/{x}", 1).unwrap_err();
    assert!(matches!(err, RouterError::Pattern { .. }));
    assert!(router.is_empty());
}

#[test]
#[should_panic]
fn insert_panics_on_malformed_pattern() {
    let mut router: Router<usize> = Router::new();
    router.insert("/{x>", 1);
}

#[test]
fn strict_rejects_duplicates() {
    let mut router: Router<usize> = Router::with_config(RouterConfig::new().strict(true));
    router.insert("/a/{x}", 1);
    assert!(matches!(
        router.try_insert("/a/{y}", 2),
        Err(RouterError::DuplicateRoute { .. })
    ));
    assert_eq!(router.get("/a/{x}"), Some(&1));

    let mut sub: Router<usize> = Router::new();
    sub.insert("/{x}", 3);
    assert!(router.try_mount("/a", sub).is_err());
    assert_eq!(router.len(), 1);
}

#[test]
fn one_placeholder_child_per_level() {
    // aliases at the same position share a trie address
    let mut router: Router<usize> = Router::new();
    router.insert("/{a}", 1).insert("/{b}", 2);
    assert_eq!(router.len(), 1);
    assert_eq!(router.get("/{a}"), Some(&2));

    let patterns: Vec<String> = router.patterns().map(|p| p.to_string()).collect();
    assert_eq!(patterns, ["/{b}"]);

    // removal addresses the slot, whatever alias is spelled
    assert_eq!(router.remove("/{c}").unwrap(), 2);
    assert!(router.is_empty());
}

#[test]
fn sorted_introspection() {
    let mut router: Router<usize> = Router::new();
    router
        .insert("/<all>", 0)
        .insert("/users/{id}", 1)
        .insert("/users", 2)
        .insert("/", 3);

    let listed: Vec<(String, usize)> = router.iter().map(|(p, r)| (p.to_string(), *r)).collect();
    assert_eq!(
        listed,
        [
            ("/".to_string(), 3),
            ("/users".to_string(), 2),
            ("/users/{id}".to_string(), 1),
            ("/<all>".to_string(), 0),
        ]
    );
}

#[test]
fn router_single() {
    let mut router: Router<usize> = Router::new();
    router.insert("/hello/{name}", 1);

    assert_eq!(*router.find("/hello/world").unwrap().resource(), 1);
    assert!(router.find("/hello/world/asd").is_none());
    assert!(router.find("/hello").is_none());
}

#[test]
fn router_nested() {
    let mut router: Router<usize> = Router::new();

    router.nest("v1", |v1| {
        v1.nest("u/{uid}", |u| {
            u.insert("p/{pid}", 1);
        });
    });

    let m = router.find("/v1/u/asd/p/qwe").unwrap();
    assert_eq!(*m.resource(), 1);
    assert_eq!(m.bindings().parse::<String>("pid"), Some(Ok("qwe".to_string())));
}

#[test]
fn concurrent_lookups() {
    let mut router: Router<usize> = Router::new();
    router.insert("/a/{x}", 1).insert("/b/<rest>", 2);

    std::thread::scope(|s| {
        for i in 0..4 {
            let router = &router;
            s.spawn(move || {
                for j in 0..100 {
                    let path = format!("/a/{}", (i * j) % 7);
                    assert_eq!(*router.find(&path).unwrap().resource(), 1);
                    assert_eq!(*router.find("/b/x/y").unwrap().resource(), 2);
                }
            });
        }
    });
}
