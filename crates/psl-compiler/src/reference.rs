//! Reference check-list
//!
//! The registrable-domain cases published alongside the Public Suffix List,
//! as `(hostname, expected registrable domain)`. `None` stands for an absent
//! hostname or an absent result. Unicode cases are meant to be converted to
//! ASCII by the caller before querying.
//!
//! The cases expect a list containing the official rules for the TLDs they
//! cover; the full list from publicsuffix.org works.

pub const REFERENCE_CHECKS: &[(Option<&str>, Option<&str>)] = &[
    (None, None),
    // Mixed case.
    (Some("COM"), None),
    (Some("example.COM"), Some("example.com")),
    (Some("WwW.example.COM"), Some("example.com")),
    // Leading dot.
    (Some(".com"), None),
    (Some(".example"), None),
    (Some(".example.com"), None),
    (Some(".example.example"), None),
    // Unlisted TLD.
    (Some("example"), None),
    (Some("example.example"), Some("example.example")),
    (Some("b.example.example"), Some("example.example")),
    (Some("a.b.example.example"), Some("example.example")),
    // TLD with only 1 rule.
    (Some("biz"), None),
    (Some("domain.biz"), Some("domain.biz")),
    (Some("b.domain.biz"), Some("domain.biz")),
    (Some("a.b.domain.biz"), Some("domain.biz")),
    // TLD with some 2-level rules.
    (Some("com"), None),
    (Some("example.com"), Some("example.com")),
    (Some("b.example.com"), Some("example.com")),
    (Some("a.b.example.com"), Some("example.com")),
    (Some("uk.com"), None),
    (Some("example.uk.com"), Some("example.uk.com")),
    (Some("b.example.uk.com"), Some("example.uk.com")),
    (Some("a.b.example.uk.com"), Some("example.uk.com")),
    (Some("test.ac"), Some("test.ac")),
    // TLD with only 1 (wildcard) rule.
    (Some("mm"), None),
    (Some("c.mm"), None),
    (Some("b.c.mm"), Some("b.c.mm")),
    (Some("a.b.c.mm"), Some("b.c.mm")),
    // More complex TLD.
    (Some("jp"), None),
    (Some("test.jp"), Some("test.jp")),
    (Some("www.test.jp"), Some("test.jp")),
    (Some("ac.jp"), None),
    (Some("test.ac.jp"), Some("test.ac.jp")),
    (Some("www.test.ac.jp"), Some("test.ac.jp")),
    (Some("kyoto.jp"), None),
    (Some("test.kyoto.jp"), Some("test.kyoto.jp")),
    (Some("ide.kyoto.jp"), None),
    (Some("b.ide.kyoto.jp"), Some("b.ide.kyoto.jp")),
    (Some("a.b.ide.kyoto.jp"), Some("b.ide.kyoto.jp")),
    (Some("c.kobe.jp"), None),
    (Some("b.c.kobe.jp"), Some("b.c.kobe.jp")),
    (Some("a.b.c.kobe.jp"), Some("b.c.kobe.jp")),
    (Some("city.kobe.jp"), Some("city.kobe.jp")),
    (Some("www.city.kobe.jp"), Some("city.kobe.jp")),
    // TLD with a wildcard rule and exceptions.
    (Some("ck"), None),
    (Some("test.ck"), None),
    (Some("b.test.ck"), Some("b.test.ck")),
    (Some("a.b.test.ck"), Some("b.test.ck")),
    (Some("www.ck"), Some("www.ck")),
    (Some("www.www.ck"), Some("www.ck")),
    // US K12.
    (Some("us"), None),
    (Some("test.us"), Some("test.us")),
    (Some("www.test.us"), Some("test.us")),
    (Some("ak.us"), None),
    (Some("test.ak.us"), Some("test.ak.us")),
    (Some("www.test.ak.us"), Some("test.ak.us")),
    (Some("k12.ak.us"), None),
    (Some("test.k12.ak.us"), Some("test.k12.ak.us")),
    (Some("www.test.k12.ak.us"), Some("test.k12.ak.us")),
    // IDN labels.
    (Some("食狮.com.cn"), Some("食狮.com.cn")),
    (Some("食狮.公司.cn"), Some("食狮.公司.cn")),
    (Some("www.食狮.公司.cn"), Some("食狮.公司.cn")),
    (Some("shishi.公司.cn"), Some("shishi.公司.cn")),
    (Some("公司.cn"), None),
    (Some("食狮.中国"), Some("食狮.中国")),
    (Some("www.食狮.中国"), Some("食狮.中国")),
    (Some("shishi.中国"), Some("shishi.中国")),
    (Some("中国"), None),
    // Same as above, but punycoded.
    (Some("xn--85x722f.com.cn"), Some("xn--85x722f.com.cn")),
    (Some("xn--85x722f.xn--55qx5d.cn"), Some("xn--85x722f.xn--55qx5d.cn")),
    (Some("www.xn--85x722f.xn--55qx5d.cn"), Some("xn--85x722f.xn--55qx5d.cn")),
    (Some("shishi.xn--55qx5d.cn"), Some("shishi.xn--55qx5d.cn")),
    (Some("xn--55qx5d.cn"), None),
    (Some("xn--85x722f.xn--fiqs8s"), Some("xn--85x722f.xn--fiqs8s")),
    (Some("www.xn--85x722f.xn--fiqs8s"), Some("xn--85x722f.xn--fiqs8s")),
    (Some("shishi.xn--fiqs8s"), Some("shishi.xn--fiqs8s")),
    (Some("xn--fiqs8s"), None),
    (Some("dont.you.watch"), Some("you.watch")),
    (Some("b.example.com"), Some("example.com")),
    (None, None),
    (Some("b.example.com"), Some("example.com")),
];
