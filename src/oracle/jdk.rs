//! The slice of the JDK class library the inspections need to see.

use super::table::{ClassInfo, MethodInfo};

type MethodRow = (&'static str, &'static [&'static str], &'static str);
type ClassRow = (&'static str, &'static [&'static str], &'static [MethodRow]);

const OBJECT: &str = "java.lang.Object";
const STRING: &str = "java.lang.String";

// (qualified name, direct supertypes, [(method, parameter types, return type)])
const CLASSES: &[ClassRow] = &[
    (
        OBJECT,
        &[],
        &[
            ("toString", &[], STRING),
            ("hashCode", &[], "int"),
            ("equals", &[OBJECT], "boolean"),
            ("getClass", &[], "java.lang.Class"),
        ],
    ),
    ("java.lang.Comparable", &[], &[("compareTo", &[OBJECT], "int")]),
    ("java.lang.Appendable", &[], &[]),
    (
        "java.lang.CharSequence",
        &[],
        &[
            ("length", &[], "int"),
            ("charAt", &["int"], "char"),
            ("toString", &[], STRING),
        ],
    ),
    (
        STRING,
        &[OBJECT, "java.lang.CharSequence", "java.lang.Comparable"],
        &[
            ("toString", &[], STRING),
            ("length", &[], "int"),
            ("trim", &[], STRING),
            ("concat", &[STRING], STRING),
            ("substring", &["int"], STRING),
            ("substring", &["int", "int"], STRING),
            ("valueOf", &[OBJECT], STRING),
        ],
    ),
    (
        "java.lang.AbstractStringBuilder",
        &[OBJECT, "java.lang.Appendable", "java.lang.CharSequence"],
        &[
            ("length", &[], "int"),
            ("capacity", &[], "int"),
            ("setLength", &["int"], "void"),
            ("charAt", &["int"], "char"),
        ],
    ),
    (
        "java.lang.StringBuffer",
        &["java.lang.AbstractStringBuilder", "java.lang.CharSequence"],
        &[
            ("toString", &[], STRING),
            ("append", &[OBJECT], "java.lang.StringBuffer"),
            ("insert", &["int", OBJECT], "java.lang.StringBuffer"),
            ("reverse", &[], "java.lang.StringBuffer"),
            ("delete", &["int", "int"], "java.lang.StringBuffer"),
        ],
    ),
    (
        "java.lang.StringBuilder",
        &["java.lang.AbstractStringBuilder", "java.lang.CharSequence"],
        &[
            ("toString", &[], STRING),
            ("append", &[OBJECT], "java.lang.StringBuilder"),
            ("insert", &["int", OBJECT], "java.lang.StringBuilder"),
            ("reverse", &[], "java.lang.StringBuilder"),
            ("delete", &["int", "int"], "java.lang.StringBuilder"),
        ],
    ),
    ("java.lang.Runnable", &[], &[("run", &[], "void")]),
    (
        "java.lang.ThreadGroup",
        &[OBJECT],
        &[("getName", &[], STRING), ("activeCount", &[], "int")],
    ),
    (
        "java.lang.Thread",
        &[OBJECT, "java.lang.Runnable"],
        &[
            ("run", &[], "void"),
            ("start", &[], "void"),
            ("interrupt", &[], "void"),
            ("join", &[], "void"),
            ("getName", &[], STRING),
            ("setDaemon", &["boolean"], "void"),
            ("toString", &[], STRING),
        ],
    ),
    (
        "java.util.TimerTask",
        &[OBJECT, "java.lang.Runnable"],
        &[("run", &[], "void"), ("cancel", &[], "boolean")],
    ),
    (
        "java.util.concurrent.RunnableFuture",
        &["java.lang.Runnable"],
        &[("run", &[], "void")],
    ),
    (
        "java.util.concurrent.FutureTask",
        &[OBJECT, "java.util.concurrent.RunnableFuture"],
        &[("run", &[], "void"), ("cancel", &["boolean"], "boolean")],
    ),
];

pub(super) fn classes() -> impl Iterator<Item = ClassInfo> {
    CLASSES.iter().map(|(name, supers, methods)| ClassInfo {
        name: (*name).to_string(),
        supertypes: supers.iter().map(|s| (*s).to_string()).collect(),
        methods: methods
            .iter()
            .map(|(m, params, ret)| MethodInfo {
                name: (*m).to_string(),
                params: params.iter().map(|p| (*p).to_string()).collect(),
                returns: Some((*ret).to_string()),
            })
            .collect(),
    })
}

/// Resolves a simple name that `java.lang` brings into scope implicitly.
pub(super) fn java_lang(simple: &str) -> Option<String> {
    CLASSES
        .iter()
        .map(|(name, _, _)| *name)
        .filter(|name| name.starts_with("java.lang."))
        .find(|name| name.rsplit('.').next() == Some(simple))
        .map(str::to_string)
}

pub(super) fn is_primitive(name: &str) -> bool {
    matches!(
        name,
        "int" | "long" | "short" | "byte" | "char" | "float" | "double" | "boolean" | "void"
    )
}
