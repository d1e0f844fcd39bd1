// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

use crate::*;

fn transform(source: &str, id: &str) -> Option<TransformOutput> {
    AutoImportPlugin::default().transform(source, id)
}

#[test]
fn test_inserts_import_after_setup_tag() {
    let source = "<script setup>\nconst x = ref(1)\n</script>";
    let out = transform(source, "src/App.vue").unwrap();
    assert_eq!(
        out.code,
        "<script setup>\nimport { ref } from 'vue'\n\nconst x = ref(1)\n</script>"
    );
}

#[test]
fn test_names_follow_configured_order() {
    let source = r#"<template>
  <p>{{ doubled }}</p>
</template>

<script setup>
const doubled = computed(() => count.value * 2)
const count = ref(1)
</script>
"#;
    let out = transform(source, "Counter.vue").unwrap();
    assert!(out
        .code
        .contains("<script setup>\nimport { ref, computed } from 'vue'\n\nconst doubled"));
}

#[test]
fn test_each_name_imported_once() {
    let source = "<script setup>\nconst a = ref(1)\nconst b = ref(2)\nonMounted(() => {})\nonMounted(() => {})\n</script>";
    let out = transform(source, "A.vue").unwrap();
    assert!(out.code.contains("import { ref, onMounted } from 'vue'\n"));
    assert_eq!(out.code.matches("import {").count(), 1);
}

#[test]
fn test_all_default_composables() {
    let source = "<script setup>\n\
        onBeforeMount(() => {})\n\
        onUnmounted(() => {})\n\
        onMounted(() => {})\n\
        const c = computed(() => 1)\n\
        watch(c, () => {})\n\
        const r = reactive({})\n\
        const v = ref(0)\n\
        </script>";
    let out = transform(source, "A.vue").unwrap();
    assert!(out.code.contains(
        "import { ref, reactive, watch, computed, onMounted, onUnmounted, onBeforeMount } from 'vue'\n"
    ));
}

#[test]
fn test_existing_import_disables_transform() {
    let source = "<script setup>\nimport { reactive } from 'vue'\nconst x = ref(1)\n</script>";
    assert!(transform(source, "A.vue").is_none());

    let double_quoted = "<script setup>\nimport {reactive} from \"vue\"\nconst x = ref(1)\n</script>";
    assert!(transform(double_quoted, "A.vue").is_none());
}

#[test]
fn test_import_from_other_module_does_not_disable() {
    let source = "<script setup>\nimport { ref as vueRef } from 'vue-demi'\nconst x = ref(1)\n</script>";
    let out = transform(source, "A.vue").unwrap();
    assert!(out.code.contains("import { ref } from 'vue'\n"));
}

#[test]
fn test_unsupported_extension_is_noop() {
    let source = "<script setup>\nconst x = ref(1)\n</script>";
    assert!(transform(source, "App.jsx").is_none());
    assert!(transform(source, "App.vue.js").is_none());
    assert!(transform(source, "App.vue?vue&type=style").is_none());
}

#[test]
fn test_missing_setup_block_is_noop() {
    assert!(transform("<script>\nconst x = ref(1)\n</script>", "A.vue").is_none());
    assert!(transform("<template><div/></template>", "A.vue").is_none());
    assert!(transform("", "A.vue").is_none());
}

#[test]
fn test_no_usage_is_noop() {
    let source = "<script setup>\nconst x = 1\n</script>";
    assert!(transform(source, "A.vue").is_none());
}

#[test]
fn test_strings_and_comments_count_as_usage() {
    let in_string = "<script setup>\nconst s = \"ref(1)\"\n</script>";
    let out = transform(in_string, "A.vue").unwrap();
    assert!(out.code.contains("import { ref } from 'vue'\n"));

    let in_comment = "<script setup>\n// TODO: computed(() => total)\n</script>";
    let out = transform(in_comment, "A.vue").unwrap();
    assert!(out.code.contains("import { computed } from 'vue'\n"));
}

#[test]
fn test_usage_outside_setup_block_ignored() {
    let source = "<template><p>{{ ref(1) }}</p></template>\n<script setup>\nconst a = 1\n</script>";
    assert!(transform(source, "A.vue").is_none());
}

#[test]
fn test_second_run_is_noop() {
    let source = "<script setup lang=\"ts\">\nconst x = ref<number>(1)\nwatch(x, () => {})\n</script>";
    // `ref<number>(` has no `(` right after the name, so only watch is picked up.
    let out = transform(source, "A.vue").unwrap();
    assert!(out.code.contains("import { watch } from 'vue'\n"));
    assert!(transform(&out.code, "A.vue").is_none());
}

#[test]
fn test_only_insertion_changes_document() {
    let source = "<template>\n  <button @click=\"count++\">{{ count }}</button>\n</template>\n\n\
                  <script setup lang=\"ts\">\nconst count = ref(0)\n</script>\n\n\
                  <style scoped>\nbutton { color: red }\n</style>\n";
    let out = transform(source, "Button.vue").unwrap();
    let statement = "\nimport { ref } from 'vue'\n";
    let offset = source.find("<script setup lang=\"ts\">").unwrap() + "<script setup lang=\"ts\">".len();

    assert_eq!(&out.code[..offset], &source[..offset]);
    assert_eq!(&out.code[offset..offset + statement.len()], statement);
    assert_eq!(&out.code[offset + statement.len()..], &source[offset..]);
}

#[test]
fn test_crlf_and_unicode_text_survive() {
    let source = "<template>\r\n  <p>héllo 😀</p>\r\n</template>\r\n<script setup>\r\nconst x = ref('ü')\r\n</script>\r\n";
    let out = transform(source, "A.vue").unwrap();
    assert!(out.code.starts_with("<template>\r\n  <p>héllo 😀</p>"));
    assert!(out.code.contains("<script setup>\nimport { ref } from 'vue'\n\r\nconst x = ref('ü')"));
}

#[test]
fn test_map_points_back_to_original_lines() {
    let source = "<template>\n  <p/>\n</template>\n<script setup>\nconst x = ref(1)\n</script>";
    let out = transform(source, "src/A.vue").unwrap();
    let map = out.map.unwrap();

    assert_eq!(map.sources, vec!["src/A.vue".to_string()]);
    assert!(map.sources_content.is_none());

    // Lines before the insertion are unchanged.
    for line in 0..4 {
        let pos = map.lookup(line, 0).unwrap();
        assert_eq!(pos.line, line);
    }
    // Line 4 is the inserted import.
    assert!(map.lookup(4, 0).is_none());
    // Line 6 is `const x = ref(1)`, originally line 4.
    let pos = map.lookup(6, 10).unwrap();
    assert_eq!((pos.line, pos.column), (4, 10));

    let error = "src/A.vue:7:11: ref is not defined";
    assert_eq!(map.translate_error(error, "src/A.vue"), "src/A.vue:5:11: ref is not defined");
}

#[test]
fn test_map_can_be_disabled_or_embed_content() {
    let source = "<script setup>\nref()\n</script>";

    let options = AutoImportOptions::default().with_sourcemap(SourceMapOptions {
        enabled: false,
        ..SourceMapOptions::default()
    });
    let out = AutoImportPlugin::new(options).unwrap().transform(source, "A.vue").unwrap();
    assert!(out.map.is_none());

    let options = AutoImportOptions::default().with_sourcemap(SourceMapOptions {
        include_content: true,
        ..SourceMapOptions::default()
    });
    let out = AutoImportPlugin::new(options).unwrap().transform(source, "A.vue").unwrap();
    let map = out.map.unwrap();
    assert_eq!(map.sources_content, Some(vec![Some(source.to_string())]));

    let json = map.to_json().unwrap();
    assert_eq!(SourceMap::from_json(&json).unwrap(), map);
}

#[test]
fn test_shared_across_threads() {
    let plugin = std::sync::Arc::new(AutoImportPlugin::default());
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let plugin = plugin.clone();
            std::thread::spawn(move || {
                let source = format!("<script setup>\nconst v{} = ref({})\n</script>", i, i);
                plugin.transform(&source, "A.vue").map(|o| o.code)
            })
        })
        .collect();

    for handle in handles {
        let code = handle.join().unwrap().unwrap();
        assert!(code.contains("import { ref } from 'vue'"));
    }
}
