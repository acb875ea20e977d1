//! Per-column rules mapping raw BETH fields to low-cardinality features.

/// Kernel-reserved pids (swapper, init, kthreadd)
pub const OS_PROCESS_IDS: [i64; 3] = [0, 1, 2];
/// uids below this are system accounts
pub const OS_USER_ID_LIMIT: i64 = 1000;
/// Initial mount namespace inode on Linux
pub const DEFAULT_MOUNT_NAMESPACE: i64 = 4026531840;

pub const TARGET_COLUMN: &str = "target";

pub const REQUIRED_COLUMNS: [&str; 7] = [
    "eventId",
    "argsNum",
    "processId",
    "parentProcessId",
    "userId",
    "mountNamespace",
    "returnValue",
];

pub fn is_os_process(pid: i64) -> bool {
    OS_PROCESS_IDS.contains(&pid)
}

pub fn is_os_user(uid: i64) -> bool {
    uid < OS_USER_ID_LIMIT
}

pub fn is_default_mount_namespace(ns: i64) -> bool {
    ns == DEFAULT_MOUNT_NAMESPACE
}

/// -1 for errors, 0 for success, 1 for success with a positive value
pub fn sign_class(return_value: i64) -> i64 {
    return_value.signum()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    Identity,
    /// 1 if the value is one of the listed ids
    Membership(&'static [i64]),
    /// 1 if strictly below the bound
    LessThan(i64),
    Equals(i64),
    Sign,
}

impl Rule {
    pub fn apply(self, raw: i64) -> i64 {
        match self {
            Rule::Identity => raw,
            Rule::Membership(set) => set.contains(&raw) as i64,
            Rule::LessThan(bound) => (raw < bound) as i64,
            Rule::Equals(expected) => (raw == expected) as i64,
            Rule::Sign => sign_class(raw),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeatureRule {
    pub source: &'static str,
    pub output: &'static str,
    pub rule: Rule,
}

/// Rules in output column order.
pub const BETH_RULES: [FeatureRule; 7] = [
    FeatureRule { source: "eventId", output: "eventId", rule: Rule::Identity },
    FeatureRule { source: "argsNum", output: "argsNum", rule: Rule::Identity },
    FeatureRule {
        source: "processId",
        output: "processId_is_os",
        rule: Rule::Membership(&OS_PROCESS_IDS),
    },
    FeatureRule {
        source: "parentProcessId",
        output: "parentProcessId_is_os",
        rule: Rule::Membership(&OS_PROCESS_IDS),
    },
    FeatureRule {
        source: "userId",
        output: "userId_is_os",
        rule: Rule::LessThan(OS_USER_ID_LIMIT),
    },
    FeatureRule {
        source: "mountNamespace",
        output: "mountNamespace_is_default",
        rule: Rule::Equals(DEFAULT_MOUNT_NAMESPACE),
    },
    FeatureRule {
        source: "returnValue",
        output: "returnValue_mapped",
        rule: Rule::Sign,
    },
];
