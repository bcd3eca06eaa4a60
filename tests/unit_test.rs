// Unit tests for userdata-tui
// These exercise the view derivation and sort toggle through the public API.

#[cfg(test)]
mod derive_tests {
    use userdata_tui::app::{SortDirection, SortDirective, SortKey};
    use userdata_tui::{UserRecord, derive_view};

    fn scenario_records() -> Vec<UserRecord> {
        vec![
            UserRecord::new(1, "Leanne Graham"),
            UserRecord::new(2, "Ervin Howell"),
        ]
    }

    fn roster() -> Vec<UserRecord> {
        vec![
            UserRecord::new(4, "Patricia Lebsack"),
            UserRecord::new(1, "Leanne Graham"),
            UserRecord::new(10, "Clementina DuBuque"),
            UserRecord::new(3, "Clementine Bauch"),
            UserRecord::new(7, "Kurtis Weissnat"),
            UserRecord::new(2, "Ervin Howell"),
            UserRecord::new(12, "ervin howell"),
        ]
    }

    fn all_sorts() -> Vec<SortDirective> {
        let mut out = vec![SortDirective::NONE];
        for key in [SortKey::Id, SortKey::Name] {
            for direction in [SortDirection::Ascending, SortDirection::Descending] {
                out.push(SortDirective { key, direction });
            }
        }
        out
    }

    fn ids(rows: &[UserRecord]) -> Vec<u64> {
        rows.iter().map(|u| u.id).collect()
    }

    #[test]
    fn scenario_1_no_search_no_sort() {
        assert_eq!(ids(&derive_view(&scenario_records(), "", SortDirective::NONE)), vec![1, 2]);
    }

    #[test]
    fn scenario_2_search_how() {
        let out = derive_view(&scenario_records(), "how", SortDirective::NONE);
        assert_eq!(out, vec![UserRecord::new(2, "Ervin Howell")]);
    }

    #[test]
    fn scenario_3_name_ascending() {
        let sort = SortDirective { key: SortKey::Name, direction: SortDirection::Ascending };
        let names: Vec<String> = derive_view(&scenario_records(), "", sort).into_iter().map(|u| u.name).collect();
        assert_eq!(names, vec!["Ervin Howell", "Leanne Graham"]);
    }

    #[test]
    fn scenario_4_search_nine_is_empty() {
        assert!(derive_view(&scenario_records(), "9", SortDirective::NONE).is_empty());
    }

    #[test]
    fn empty_term_returns_every_record_for_any_sort() {
        let records = roster();
        for sort in all_sorts() {
            let mut got = ids(&derive_view(&records, "", sort));
            got.sort_unstable();
            let mut want = ids(&records);
            want.sort_unstable();
            assert_eq!(got, want, "sort {sort:?}");
        }
    }

    #[test]
    fn any_case_variant_of_a_name_substring_matches() {
        let records = roster();
        for r in &records {
            let chars: Vec<char> = r.name.chars().collect();
            for start in 0..chars.len() {
                for end in start + 1..=chars.len().min(start + 4) {
                    let sub: String = chars[start..end].iter().collect();
                    for variant in [sub.to_uppercase(), sub.to_lowercase(), sub.clone()] {
                        let out = derive_view(&records, &variant, SortDirective::NONE);
                        assert!(out.iter().any(|u| u.id == r.id), "{variant:?} should match {}", r.name);
                    }
                }
            }
        }
    }

    #[test]
    fn unmatched_term_yields_empty() {
        for sort in all_sorts() {
            assert!(derive_view(&roster(), "qqq", sort).is_empty());
        }
    }

    #[test]
    fn id_sort_is_monotonic() {
        let asc = SortDirective { key: SortKey::Id, direction: SortDirection::Ascending };
        let out = ids(&derive_view(&roster(), "", asc));
        assert!(out.windows(2).all(|w| w[0] <= w[1]));
        let desc = SortDirective { key: SortKey::Id, direction: SortDirection::Descending };
        let out = ids(&derive_view(&roster(), "", desc));
        assert!(out.windows(2).all(|w| w[0] >= w[1]));
        assert_eq!(out.first(), Some(&12));
    }

    #[test]
    fn name_sort_is_monotonic_lowercase() {
        let asc = SortDirective { key: SortKey::Name, direction: SortDirection::Ascending };
        let names: Vec<String> = derive_view(&roster(), "", asc).iter().map(|u| u.name.to_lowercase()).collect();
        assert!(names.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn no_sort_preserves_filtered_input_order() {
        let records = roster();
        let out = derive_view(&records, "e", SortDirective::NONE);
        let expected: Vec<u64> = records
            .iter()
            .filter(|u| u.name.to_lowercase().contains('e'))
            .map(|u| u.id)
            .collect();
        assert_eq!(ids(&out), expected);
    }

    #[test]
    fn repeated_calls_are_identical() {
        let records = roster();
        for sort in all_sorts() {
            assert_eq!(derive_view(&records, "in", sort), derive_view(&records, "in", sort));
        }
    }

    #[test]
    fn output_is_a_subset_without_duplicates() {
        let records = roster();
        for sort in all_sorts() {
            let out = derive_view(&records, "l", sort);
            let mut seen = std::collections::HashSet::new();
            for u in &out {
                assert!(records.contains(u));
                assert!(seen.insert(u.id));
            }
        }
    }
}

#[cfg(test)]
mod toggle_tests {
    use userdata_tui::app::{AppState, SortDirection, SortDirective, SortKey};

    #[test]
    fn clicking_id_three_times() {
        let mut app = AppState::default();
        let mut states = Vec::new();
        for _ in 0..3 {
            app.on_sort_column_click(SortKey::Id);
            states.push(app.sort);
        }
        let asc = SortDirective { key: SortKey::Id, direction: SortDirection::Ascending };
        let desc = SortDirective { key: SortKey::Id, direction: SortDirection::Descending };
        assert_eq!(states, vec![asc, desc, asc]);
    }

    #[test]
    fn switching_columns_resets_direction() {
        let mut app = AppState::default();
        app.on_sort_column_click(SortKey::Name);
        app.on_sort_column_click(SortKey::Name);
        app.on_sort_column_click(SortKey::Id);
        assert_eq!(app.sort, SortDirective { key: SortKey::Id, direction: SortDirection::Ascending });
    }
}

#[cfg(test)]
mod keymap_tests {
    use userdata_tui::app::keymap::{KeyAction, Keymap};

    fn temp_path(tag: &str) -> std::path::PathBuf {
        let nonce = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        std::env::temp_dir().join(format!("udt_{}_{}_{}.conf", tag, std::process::id(), nonce))
    }

    #[test]
    fn custom_binding_overrides_default() {
        let path = temp_path("keys");
        std::fs::write(&path, "# custom\nSortByName = s\nRetry = Ctrl+r\nnot a binding\n").unwrap();
        let km = Keymap::from_file(&path).unwrap();
        assert!(km.keys_for(KeyAction::SortByName).contains(&"s".to_string()));
        assert!(km.keys_for(KeyAction::Retry).contains(&"Ctrl+r".to_string()));
        // defaults survive
        assert!(km.keys_for(KeyAction::Quit).contains(&"q".to_string()));
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn load_or_init_writes_defaults() {
        let path = temp_path("keys_init");
        let _ = std::fs::remove_file(&path);
        let _ = Keymap::load_or_init(&path);
        assert!(path.exists());
        let reloaded = Keymap::from_file(&path).unwrap();
        assert_eq!(reloaded.keys_for(KeyAction::SortById), vec!["i".to_string()]);
        let _ = std::fs::remove_file(&path);
    }
}
