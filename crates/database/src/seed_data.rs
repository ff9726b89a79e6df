//! The fixed content inserted on first start.

/// `(name, brief_description)` of each treatment, in insertion order.
pub const TREATMENTS: [(&str, &str); 3] = [
    (
        "全身ステロイド（屯用）",
        "発作時など症状が強いときに短期間だけ全身ステロイドを使用する治療です。",
    ),
    (
        "全身ステロイド（連用）",
        "症状を抑えるために、少量の全身ステロイドを継続して服用する治療です。",
    ),
    (
        "生物学的製剤",
        "喘息の原因となる炎症物質をピンポイントで抑える注射薬による治療です。",
    ),
];

/// `(name, order_index)` of each comparison attribute.
pub const ATTRIBUTES: [(&str, i64); 5] = [
    ("効果", 1),
    ("副作用", 2),
    ("費用", 3),
    ("日常生活への影響", 4),
    ("通院・投与頻度", 5),
];

/// `(pros_text, cons_text)` per treatment (outer, same order as `TREATMENTS`)
/// and attribute (inner, same order as `ATTRIBUTES`).
pub const DETAILS: [[(&str, &str); 5]; 3] = [
    [
        (
            "発作時の症状を速やかに抑えられることが多い。",
            "効果が一時的で、根本的なコントロールには不十分な場合がある。",
        ),
        (
            "短期間であれば副作用のリスクは比較的低い。",
            "繰り返し使用すると、骨粗鬆症や糖尿病などのリスクが高まる。",
        ),
        (
            "薬剤費は比較的安価。",
            "発作が頻回だと、トータルの負担が増える可能性がある。",
        ),
        (
            "普段は薬を飲まなくてよい場合もある。",
            "発作の予兆に敏感でいる必要があり、不安につながることがある。",
        ),
        (
            "必要時のみの内服で、通院頻度は比較的少ない。",
            "緊急時に受診や処方が必要になることがある。",
        ),
    ],
    [
        (
            "症状を安定させ、発作の回数を減らせる可能性がある。",
            "長期使用が前提となるため、副作用とのバランスが重要。",
        ),
        (
            "少量であれば副作用をある程度抑えられる場合がある。",
            "長期連用により、体重増加、血糖上昇、骨粗鬆症などのリスクがある。",
        ),
        (
            "生物学的製剤と比べると薬剤費は安価。",
            "長期間続けるとトータルのコストはかさんでいく。",
        ),
        (
            "内服習慣が生活に組み込まれれば、安定した日常を送りやすい。",
            "毎日内服が必要で、飲み忘れへの不安がある。",
        ),
        (
            "通院頻度は患者さんの状況に応じて調整可能。",
            "定期的な検査やフォローが必要になる。",
        ),
    ],
    [
        (
            "重症喘息に対して高い効果が期待できることが多い。",
            "全ての患者さんに効果があるわけではない。",
        ),
        (
            "全身ステロイドと比べて、長期的な副作用リスクが少ない場合がある。",
            "注射部位反応など、特有の副作用が出ることがある。",
        ),
        (
            "高い効果により、入院や救急受診の減少が期待できる。",
            "薬剤費が高額で、自己負担も大きくなりやすい。",
        ),
        (
            "症状が安定すれば、日常生活や仕事・学校への支障が減る可能性がある。",
            "定期的な注射のために時間を確保する必要がある。",
        ),
        (
            "月1回程度の投与でコントロールを目指す治療が多い。",
            "通院間隔は長いが、1回あたりの拘束時間は長くなることがある。",
        ),
    ],
];

/// Question texts asked for every treatment; order indices start at 1.
pub const QUESTIONS: [&str; 3] = [
    "この治療のメリットについて、どの程度理解できましたか？",
    "この治療の副作用やリスクについて、どの程度理解できましたか？",
    "費用や通院頻度について、どの程度イメージできましたか？",
];

/// `(label, score)` answer options attached to every question.
pub const CHOICES: [(&str, i64); 5] = [
    ("全くわからなかった", 1),
    ("あまりわからなかった", 2),
    ("だいたいわかった", 3),
    ("よくわかった", 4),
    ("十分に理解できた", 5),
];
