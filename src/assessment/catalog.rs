//! Built-in assessments used when the config file defines none.

use super::model::{AnswerOption, Assessment, Question, Text, Tier};

pub const AI_READINESS_ID: &str = "ai-readiness";
pub const LEAD_QUALIFICATION_ID: &str = "lead-qualification";

fn opt(en: &str, ar: &str, weight: i64) -> AnswerOption {
    AnswerOption {
        label: Text::bilingual(en, ar),
        weight,
    }
}

fn tier(en: &str, ar: &str, threshold: i64, msg_en: &str, msg_ar: &str) -> Tier {
    Tier {
        name: Text::bilingual(en, ar),
        threshold,
        message: Some(Text::bilingual(msg_en, msg_ar)),
    }
}

/// Five-question quiz scoring how ready a business is to adopt AI (5-20 points).
pub fn ai_readiness() -> Assessment {
    Assessment {
        id: AI_READINESS_ID.to_string(),
        title: Text::bilingual("AI Readiness Quiz", "اختبار الجاهزية للذكاء الاصطناعي"),
        description: Some(Text::bilingual(
            "Five quick questions to see where your business stands on AI adoption.",
            "خمسة أسئلة سريعة لمعرفة موقع عملك من تبني الذكاء الاصطناعي.",
        )),
        questions: vec![
            Question {
                prompt: Text::bilingual(
                    "How is your business data stored today?",
                    "كيف يتم تخزين بيانات عملك اليوم؟",
                ),
                options: vec![
                    opt("Mostly on paper", "ورقياً في الغالب", 1),
                    opt("Spreadsheets on individual machines", "جداول بيانات على أجهزة فردية", 2),
                    opt("A shared system or CRM", "نظام مشترك أو نظام إدارة علاقات العملاء", 3),
                    opt("A centralized, well-structured database", "قاعدة بيانات مركزية ومنظمة", 4),
                ],
            },
            Question {
                prompt: Text::bilingual(
                    "How much of your routine work is automated?",
                    "ما مقدار الأعمال الروتينية المؤتمتة لديك؟",
                ),
                options: vec![
                    opt("None", "لا شيء", 1),
                    opt("A few simple tasks", "بعض المهام البسيطة", 2),
                    opt("Several core processes", "عدة عمليات أساسية", 3),
                    opt("Most repeatable work", "معظم الأعمال المتكررة", 4),
                ],
            },
            Question {
                prompt: Text::bilingual(
                    "How comfortable is your team with new digital tools?",
                    "ما مدى ارتياح فريقك للأدوات الرقمية الجديدة؟",
                ),
                options: vec![
                    opt("Resistant to change", "يقاوم التغيير", 1),
                    opt("Willing with support", "مستعد مع الدعم", 2),
                    opt("Comfortable", "مرتاح", 3),
                    opt("Eager early adopters", "متحمس للتبني المبكر", 4),
                ],
            },
            Question {
                prompt: Text::bilingual(
                    "Do you have a budget set aside for technology improvements?",
                    "هل لديك ميزانية مخصصة لتحسينات التقنية؟",
                ),
                options: vec![
                    opt("No budget", "لا توجد ميزانية", 1),
                    opt("Occasional spending", "إنفاق عرضي", 2),
                    opt("A yearly budget", "ميزانية سنوية", 3),
                    opt("A dedicated innovation budget", "ميزانية مخصصة للابتكار", 4),
                ],
            },
            Question {
                prompt: Text::bilingual(
                    "How clear are your goals for using AI?",
                    "ما مدى وضوح أهدافك من استخدام الذكاء الاصطناعي؟",
                ),
                options: vec![
                    opt("Not sure where to start", "لست متأكداً من أين أبدأ", 1),
                    opt("Some ideas", "لدي بعض الأفكار", 2),
                    opt("Specific use cases identified", "حالات استخدام محددة", 3),
                    opt("A roadmap with measurable goals", "خارطة طريق بأهداف قابلة للقياس", 4),
                ],
            },
        ],
        tiers: vec![
            tier(
                "Pioneer",
                "رائد",
                20,
                "You are ready to lead with AI. Let's plan your next big move.",
                "أنت جاهز للريادة بالذكاء الاصطناعي. لنخطط لخطوتك الكبيرة التالية.",
            ),
            tier(
                "Ready",
                "جاهز",
                15,
                "Strong foundations. A focused pilot could pay off quickly.",
                "أسس قوية. مشروع تجريبي مركز قد يحقق نتائج سريعة.",
            ),
            tier(
                "Potential",
                "واعد",
                10,
                "Good potential. A few process changes will unlock real value.",
                "إمكانات جيدة. بعض التغييرات في العمليات ستطلق قيمة حقيقية.",
            ),
            tier(
                "Starter",
                "مبتدئ",
                5,
                "You have a starting point. Let's map out the first steps together.",
                "لديك نقطة انطلاق. لنرسم الخطوات الأولى معاً.",
            ),
            tier(
                "Explorer",
                "مستكشف",
                0,
                "Every journey starts somewhere. Book a free discovery call.",
                "كل رحلة تبدأ من مكان ما. احجز مكالمة استكشافية مجانية.",
            ),
        ],
    }
}

/// Five-question qualification flow for incoming consulting leads (0-15 points).
pub fn lead_qualification() -> Assessment {
    Assessment {
        id: LEAD_QUALIFICATION_ID.to_string(),
        title: Text::bilingual("Lead Qualification", "تأهيل العملاء المحتملين"),
        description: Some(Text::bilingual(
            "Tell us about your business so we can recommend the right engagement.",
            "أخبرنا عن عملك لنوصي بنوع التعاون المناسب.",
        )),
        questions: vec![
            Question {
                prompt: Text::bilingual("How large is your company?", "ما حجم شركتك؟"),
                options: vec![
                    opt("Just me", "أعمل بمفردي", 0),
                    opt("2-10 people", "من 2 إلى 10 أشخاص", 1),
                    opt("11-50 people", "من 11 إلى 50 شخصاً", 2),
                    opt("More than 50 people", "أكثر من 50 شخصاً", 3),
                ],
            },
            Question {
                prompt: Text::bilingual(
                    "What is your expected budget for this project?",
                    "ما الميزانية المتوقعة لهذا المشروع؟",
                ),
                options: vec![
                    opt("Not decided yet", "لم تحدد بعد", 0),
                    opt("Under $5,000", "أقل من 5,000 دولار", 1),
                    opt("$5,000 - $20,000", "من 5,000 إلى 20,000 دولار", 2),
                    opt("More than $20,000", "أكثر من 20,000 دولار", 3),
                ],
            },
            Question {
                prompt: Text::bilingual(
                    "When do you want to get started?",
                    "متى ترغب في البدء؟",
                ),
                options: vec![
                    opt("Just exploring", "أستكشف فقط", 0),
                    opt("Within 6 months", "خلال 6 أشهر", 1),
                    opt("Within 3 months", "خلال 3 أشهر", 2),
                    opt("Immediately", "فوراً", 3),
                ],
            },
            Question {
                prompt: Text::bilingual(
                    "What is your role in the decision?",
                    "ما دورك في اتخاذ القرار؟",
                ),
                options: vec![
                    opt("Gathering information", "أجمع المعلومات", 0),
                    opt("Recommending to others", "أرفع التوصيات للآخرين", 1),
                    opt("Part of the decision team", "جزء من فريق القرار", 2),
                    opt("Final decision maker", "صاحب القرار النهائي", 3),
                ],
            },
            Question {
                prompt: Text::bilingual(
                    "What is your biggest challenge right now?",
                    "ما أكبر تحد تواجهه حالياً؟",
                ),
                options: vec![
                    opt("Not sure yet", "لست متأكداً بعد", 0),
                    opt("Marketing and brand", "التسويق والعلامة التجارية", 2),
                    opt("Operations and processes", "العمليات والإجراءات", 3),
                    opt("Growth and strategy", "النمو والاستراتيجية", 3),
                ],
            },
        ],
        tiers: vec![
            tier(
                "Priority",
                "أولوية",
                11,
                "You are a great fit. Let's schedule a strategy session this week.",
                "أنت مناسب تماماً. لنحدد جلسة استراتيجية هذا الأسبوع.",
            ),
            tier(
                "Qualified",
                "مؤهل",
                6,
                "We can help. Let's talk about the right package for you.",
                "يمكننا المساعدة. لنتحدث عن الباقة المناسبة لك.",
            ),
            tier(
                "Nurture",
                "متابعة",
                0,
                "Thanks! We'll send you resources to help you get started.",
                "شكراً لك! سنرسل لك موارد تساعدك على البدء.",
            ),
        ],
    }
}

pub fn builtin() -> Vec<Assessment> {
    vec![ai_readiness(), lead_qualification()]
}
