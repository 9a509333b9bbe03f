//! Fixed key material and expected values for tests.
//!
//! The blinding values were computed independently of this crate and are
//! checked bit-exactly, so a client written against the same byte-order,
//! padding, and hashing conventions must reproduce them.

use crate::*;
use num_bigint_dig::BigUint;

pub const N_HEX: &str = concat!(
    "c55dd7a98020e97e46eb8eb1c0cca4a9aa7c472ab023dad061ae35a3fe61dab1b292711f5ad6740c072975f4",
    "58bcab13c680a11e16cb10127de67e08a7c25109ee2b5bab225c51926e094f383044c3087181e5f90345d70b",
    "fe05123662b5b6da795e606aedb7e606aabe5fa39f1aa258a5cd0798d79cd276f86bcb90645fbe2ec3a816fb",
    "ee25b0215da42eb675d6bc41c9e671bb4616dfd30b00c53b6f785e1ccd8a0aa98ebffbc359a79705ab893ee5",
    "54884a9fa1afc72ea6b5b5f7143d5e9c599861926cdeca78f21503ed1af6e8befa6dfd9de2f3bce402827cb9",
    "fe8d86187f4ec05342d3c0a65e37f04b7e16cf721f48a693c8d2295295abbf9b1be34171"
);

pub const D_HEX: &str = concat!(
    "acdeec7617b73c2d11fb632a088076bdf1891760a9954e24755a7cbb5ea5e14301f148ca38eb5c0be8fe04c5",
    "f82f90fd2a42225d53839b5947136b5333757d3be073f3bfeac1c7e525225c540fdb3aa51b9eb68b2cb5b08d",
    "5d7a9da02b479498b9f3d329f57bbd2c1bc3d1cb6421950f66723674466ea2ddf7eb9b0aa7104167f42bbf16",
    "cb58e166346be0184983eca56a230234cd8b62eaa042fd3245b3373d74fff43bdcfbe078fdbf0d84e34f1134",
    "a1f50e4ec6447ea1ec4ef686aa36065f396ba0f0ac0ae444826920d131db9db9f37926d59175b1255444a971",
    "6b3c0f129ca6a0cbbd48fc698027fcc56b43edf457a599b1400ca44e8cc5911c2b4a91c1"
);

pub const P_HEX: &str = concat!(
    "eddfb58038728036c3fd8e560ed288afb2f7560baaaa15e0401a66b4381255b4a32607d3549637c64df3dbb8",
    "0056455109999ab7c64701e8fe948e9a5f80114fa739b95d3d810e5a0cb0597ff1c9531386ae8277bdbb11e9",
    "69309f837fa097d771b16e3bf8a54904f60a3fc14860ec7a7329eb86181772c19078260be93f4ae9"
);

pub const Q_HEX: &str = concat!(
    "d467f171beaee830d2c9c5630a321f4a78e71b1dafdbc30c9878a9c1f5c231580aef41528c98ebe74131056d",
    "a41e08caea12d7391fa1ec0c1bed11d75f043c3c55c6124579f3bb1d8f417b6ee23d0ea41575e99a83f2d93f",
    "87d55657a4471e25f51139e8aaf0b961d16bb2937ea6d8f691701c1696ae44dd9b39aa61ecf69d49"
);

pub const R_HEX: &str = concat!(
    "b5cfeb1c3d96ff58fc7900e38050b3461a0373d5b6c92d65c9679ff0c64e4572d33d1f54e9997dc811224a2c",
    "3686d6060c23f12807ca2a842be560c5be1b68bbb5cfeb1c3d96ff58fc7900e38050b3461a0373d5b6c92d65",
    "c9679ff0c64e4572d33d1f54e9997dc811224a2c3686d6060c23f12807ca2a842be560c5be1b68bbb5cfeb1c",
    "3d96ff58fc7900e38050b3461a0373d5b6c92d65c9679ff0c64e4572d33d1f54e9997dc811224a2c3686d606",
    "0c23f12807ca2a842be560c5be1b68bbb5cfeb1c3d96ff58fc7900e38050b3461a0373d5b6c92d65c9679ff0",
    "c64e4572d33d1f54e9997dc811224a2c3686d6060c23f12807ca2a842be560c5be1b68bb"
);

pub const BLINDED_B64: &str = concat!(
    "BqQtJOaGUlXiSUdwOs4SJLHSWn2SSoaAKt+SSbyyHVyijsElYxUs+fIKXFe5ppVVorIv/SIBxPHLTYVGtqLPYJQu",
    "z1CzbunKJAkLBw+frWxxxnmnRp4UuEtcyDfK3A2awYJ8z6twhSehAUhMJb9gElH+4rbwEo8a+jZtsR7207FwzOV/",
    "xzUofgKD/m7WwuoPh55V8Z1sjLqhAUrceEW1JW/1aS67fglxO1jkVLr+Q8zYUKlaahGhA2uSaXTosZns8y4vRBfh",
    "C57Sx158CnYAOmRDxn8m2RoJ7//l8jLXCxLx4aND9SnnvmcU5k9AHzweaOVLxZ6Lqy+F2EUDFBZGXg=="
);

pub const SIGNED_B64: &str = concat!(
    "VRMRm0AUbhmNeWmD6YV27/qF0edvaJEKsA39Scc3CuhixKjecK/07ojwWu1aStbetm8Ic2+YGo++ZACWMCX2wiA0",
    "j33XCu+a9cMyQ/b1gbriYFnS52YvJ8IkHVcjiTyhWe74XI37rAHWYuZhMWSqKb8NAym7pgWkvGueChH1bMfURxd2",
    "zUscPH3cVGd701U+THxaQr3DiadgkJdtdNT4XfUJicr1sk+SgxQu1udde12DD8kVLDnQSR8dHwOIr21ttK6IMN5Y",
    "CTIUMD/CVcKqvOG9AZJDtLfA+1FFDhZx569AQtnBv5NVER+kqEVsYycvV1U69nuPVWEIiOZsotOEug=="
);

pub const SIG_B64: &str = concat!(
    "FMnnFlm8ftxXjBQPfdWFR8eKZnF5ZCx4/lUxBhZLVjCES85sNKwaaeMHtkI4KhL/v5Xnempsk+JswjsnsGTnoKYC",
    "t2PY5PTycgRJD4YwgDDZ6ZihHDw4uBwpTQYrneoqOJBGF/11GWO0xKZ70Orq7LLNUQQYDh56ZUidhg73eU5PjL7+",
    "tnzlWunQ4ul/vS98jZE9M0ID7T7hknfin4LU1J4tn0E8q+HQyCJLefvhb99UWMAqMRD/BiSnzvEDo7FMcG+592RK",
    "UO95XbC05xI1Lo1TVkRauAro9tkHSkOalpUIl0GPRwD5a/TGk6ay9N104tzKFEtdexYqK5MaYlXJ0A=="
);

pub const N2_HEX: &str = concat!(
    "a1f5c8a262c8938d15bc435230b4b7a431d360bce5507203ff98a97e043aa4840b023032cbaabcfff156960a",
    "402bb6aae6337484d462a8b05f76383eda543afe83f3b8137fd34a4df51839d2f79d6df8d05276f775feb591",
    "c2f4751d0d592b79e79d0485d82cedbaaff2f94bcf49a9f76ba0bb9d58cc2597dc7789df2a8fe08cac5b082b",
    "ea73d7ace8c521068039f1f5bcd5ad4615f366ece227831f4b3a2cd33f91b6a3c91d3a6bc65e558a852c4e11",
    "f4badff3cce809828e056b49617ab29a5dbd4bfb330e253db5a51a096a4b0da7c7450a07b821f66ca301febd",
    "c73a8938752b374b87509e91b68253a654e66d672e565c5d6e464195135ca97c8e8109c9"
);

pub const D2_HEX: &str = concat!(
    "98c8c3fc6c33cafdcd034c7ebc73bec9a637418af0c872c652d8310c2ff122416e212256c8cac880a9aa84e0",
    "26a916292200686ae5f02c3235dbd0337ac2fae41e964b901985b912d1a388e8fbae079030f59a44d78af0be",
    "10ab8bcf5c48423b3dc36200e16d80d61c259a076a0493d25435ccc7227d72f94f81750e919828bb0b41675e",
    "2e7dc4c971561883ac765d3bc85decfda89693cb1a4fe2d601ba51b4fd502aaffbf175e747ac00409427b1f9",
    "7a0a142816bfff2416c06562bdf3644da7615b40ac26a896f625414dc88a06175b684b4abeec03355f26acc9",
    "87353c0f761c7d5e4e2092f0e370f01faeb384bd70f8d011354d8458aef171fed0d5181"
);

pub const P2_HEX: &str = concat!(
    "c2359cc60f0b25f655df3b2dabe32052560655d8db30f5db54f2edffd12753e54ef681bc21b9df537a2869a6",
    "6a278af3c5e5b615a44ed0f3ed27b97d4a2e28f593180c8be70b382ab216b0456b1f997dc8cbe45fa2cb5722",
    "4a02de33e843945f14d3264d824dc970dfb3afa0fbd3eef87104c5efd016cdfdfe3e6e3dfde8d90d"
);

pub const Q2_HEX: &str = concat!(
    "d57d7556655d161f4b36f3417ce91080cb684beac14d0e9c39e1618dd5b319218e0046651bdaab4a650ab123",
    "9f9f3ce2a36c29214b261da444c19e922c24a4ef79e33fd2e8ffecd1b1af0b79c0cb31c5f248c145750b9d8f",
    "e730e64d3bb9320c0cf2e25f3b13ebd8cbcd3c1169288aaf71d4c3703eeb5ec2dca10298ebf0ccad"
);

pub const TOKEN_HEX: &str = "7ba0705f4ffec58837c23df38504f81db491eb5fc068a3a978a4fa574e466463";

pub const TOKEN_FINGERPRINT: &str = "8e0199ee4ae9bd26a853058c5e5a425c3ce25d71ecf25d034347c279d5abbeb7";

pub fn big(hex: &str) -> BigUint {
    BigUint::parse_bytes(hex.as_bytes(), 16).unwrap()
}

fn key_from_hex(n: &str, d: &str, p: &str, q: &str) -> IssuerKey {
    IssuerKey::from_components(big(n), BigUint::from(65537u32), big(d), vec![big(p), big(q)])
        .unwrap()
}

lazy_static::lazy_static! {
    /// Issuer key matching the blinding vectors
    pub static ref ISSUER_KEY: IssuerKey = key_from_hex(N_HEX, D_HEX, P_HEX, Q_HEX);

    /// An unrelated issuer key of the same size
    pub static ref OTHER_KEY: IssuerKey = key_from_hex(N2_HEX, D2_HEX, P2_HEX, Q2_HEX);
}

pub fn issuer_key() -> &'static IssuerKey {
    let _ = env_logger::try_init();
    &ISSUER_KEY
}

pub fn other_key() -> &'static IssuerKey {
    &OTHER_KEY
}

pub fn public_key() -> IssuerPublicKey {
    issuer_key().public_key()
}

/// Run the whole holder/issuer exchange and return a spendable credential
pub fn credential(key: &IssuerKey) -> (Token, Signature) {
    let public = key.public_key();
    let token = Token::generate();
    let (blinded, factor) = public.blind(&token).unwrap();
    let signed = key.blind_sign(&blinded).unwrap();
    let signature = public.unblind(&signed, factor).unwrap();
    (token, signature)
}
